//! Performance endpoints
//!
//! A performance is one player's fantasy scoring for one week.

use axum::{extract::State, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use swc_common::db::{self, Performance, PerformanceFilter};

use crate::{
    error::ApiError,
    extract::Query,
    pagination::{default_limit, page},
    AppState,
};

/// Query parameters for GET /performances/
#[derive(Debug, Deserialize)]
pub struct PerformancesQuery {
    #[serde(default)]
    pub skip: i64,

    #[serde(default = "default_limit")]
    pub limit: i64,

    pub minimum_last_changed_date: Option<NaiveDate>,
}

/// GET /performances/
pub async fn list_performances(
    State(state): State<AppState>,
    Query(query): Query<PerformancesQuery>,
) -> Result<Json<Vec<Performance>>, ApiError> {
    let page = page(query.skip, query.limit)?;
    let filter = PerformanceFilter {
        min_last_changed_date: query.minimum_last_changed_date,
    };

    let mut conn = state.db.acquire().await?;
    let performances = db::list_performances(&mut conn, &filter, page).await?;

    Ok(Json(performances))
}
