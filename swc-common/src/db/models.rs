//! Database models
//!
//! `*Summary` types map one table row. The composite types add the related
//! rows the API returns alongside each entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One weekly scoring record for a player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Performance {
    /// Internal identifier; not sequential, not a count
    pub performance_id: i64,
    pub player_id: i64,
    pub week_number: String,
    pub fantasy_points: f64,
    pub last_changed_date: NaiveDate,
}

/// Player row without related records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PlayerSummary {
    pub player_id: i64,
    /// NFL Game Statistics & Information System identifier
    pub gsis_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub last_changed_date: NaiveDate,
}

/// Player with the performances recorded for them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(flatten)]
    pub player: PlayerSummary,
    pub performances: Vec<Performance>,
}

/// Team row without roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TeamSummary {
    pub team_id: i64,
    pub league_id: i64,
    pub team_name: String,
    pub last_changed_date: NaiveDate,
}

/// Team with its rostered players
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(flatten)]
    pub team: TeamSummary,
    pub players: Vec<PlayerSummary>,
}

/// League row without teams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct LeagueSummary {
    pub league_id: i64,
    pub league_name: String,
    pub scoring_type: String,
    pub last_changed_date: NaiveDate,
}

/// League with its member teams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct League {
    #[serde(flatten)]
    pub league: LeagueSummary,
    pub teams: Vec<TeamSummary>,
}

/// Scoring period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Week {
    pub week_number: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub last_changed_date: NaiveDate,
}

/// Full-table row counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub league_count: i64,
    pub team_count: i64,
    pub player_count: i64,
    pub week_count: i64,
}
