//! Pagination and filter predicates shared by every list query
//!
//! Each list query takes a [`Page`] plus one filter struct of optional
//! fields. Absent fields add no condition; present ones are ANDed.

use crate::{Error, Result};
use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite};

/// Rows returned when the caller gives no limit
pub const DEFAULT_LIMIT: i64 = 100;

/// Offset window over a deterministically ordered result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Matching rows discarded from the start of the ordering
    pub skip: i64,
    /// Maximum rows returned after skipping
    pub limit: i64,
}

impl Page {
    /// Validated page: `skip >= 0`, `limit >= 1`
    pub fn new(skip: i64, limit: i64) -> Result<Self> {
        if skip < 0 {
            return Err(Error::InvalidInput(format!(
                "skip must be a non-negative integer, got {}",
                skip
            )));
        }
        if limit < 1 {
            return Err(Error::InvalidInput(format!(
                "limit must be a positive integer, got {}",
                limit
            )));
        }
        Ok(Self { skip, limit })
    }

    /// Append `LIMIT ? OFFSET ?`
    pub(crate) fn push_window(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        qb.push(" LIMIT ")
            .push_bind(self.limit)
            .push(" OFFSET ")
            .push_bind(self.skip);
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// A filter that contributes WHERE conditions to a list query
pub trait QueryFilter: Send + Sync {
    fn push_where(&self, qb: &mut QueryBuilder<'_, Sqlite>);
}

/// Emits ` WHERE ` before the first condition and ` AND ` before the rest
#[derive(Debug, Default)]
struct Conditions {
    started: bool,
}

impl Conditions {
    fn next<'q, 'args>(
        &mut self,
        qb: &'q mut QueryBuilder<'args, Sqlite>,
    ) -> &'q mut QueryBuilder<'args, Sqlite> {
        qb.push(if self.started { " AND " } else { " WHERE " });
        self.started = true;
        qb
    }

    /// Inclusive watermark on `last_changed_date`
    fn min_last_changed(&mut self, qb: &mut QueryBuilder<'_, Sqlite>, date: Option<NaiveDate>) {
        if let Some(date) = date {
            self.next(qb).push("last_changed_date >= ").push_bind(date);
        }
    }

    fn text_eq(&mut self, qb: &mut QueryBuilder<'_, Sqlite>, column: &str, value: &Option<String>) {
        if let Some(value) = value {
            self.next(qb)
                .push(column)
                .push(" = ")
                .push_bind(value.clone());
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerFilter {
    pub min_last_changed_date: Option<NaiveDate>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl QueryFilter for PlayerFilter {
    fn push_where(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        let mut conditions = Conditions::default();
        conditions.min_last_changed(qb, self.min_last_changed_date);
        conditions.text_eq(qb, "first_name", &self.first_name);
        conditions.text_eq(qb, "last_name", &self.last_name);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerformanceFilter {
    pub min_last_changed_date: Option<NaiveDate>,
}

impl QueryFilter for PerformanceFilter {
    fn push_where(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        Conditions::default().min_last_changed(qb, self.min_last_changed_date);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeagueFilter {
    pub min_last_changed_date: Option<NaiveDate>,
    /// League names are not unique
    pub league_name: Option<String>,
}

impl QueryFilter for LeagueFilter {
    fn push_where(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        let mut conditions = Conditions::default();
        conditions.min_last_changed(qb, self.min_last_changed_date);
        conditions.text_eq(qb, "league_name", &self.league_name);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamFilter {
    pub min_last_changed_date: Option<NaiveDate>,
    /// Unique within a league only
    pub team_name: Option<String>,
    pub league_id: Option<i64>,
}

impl QueryFilter for TeamFilter {
    fn push_where(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        let mut conditions = Conditions::default();
        conditions.min_last_changed(qb, self.min_last_changed_date);
        conditions.text_eq(qb, "team_name", &self.team_name);
        if let Some(league_id) = self.league_id {
            conditions.next(qb).push("league_id = ").push_bind(league_id);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekFilter {
    pub min_last_changed_date: Option<NaiveDate>,
}

impl QueryFilter for WeekFilter {
    fn push_where(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        Conditions::default().min_last_changed(qb, self.min_last_changed_date);
    }
}
