//! Week endpoints

use axum::{extract::State, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use swc_common::db::{self, Week, WeekFilter};

use crate::{
    error::ApiError,
    extract::Query,
    pagination::{default_limit, page},
    AppState,
};

/// Query parameters for GET /weeks/
#[derive(Debug, Deserialize)]
pub struct WeeksQuery {
    #[serde(default)]
    pub skip: i64,

    #[serde(default = "default_limit")]
    pub limit: i64,

    pub minimum_last_changed_date: Option<NaiveDate>,
}

/// GET /weeks/
pub async fn list_weeks(
    State(state): State<AppState>,
    Query(query): Query<WeeksQuery>,
) -> Result<Json<Vec<Week>>, ApiError> {
    let page = page(query.skip, query.limit)?;
    let filter = WeekFilter {
        min_last_changed_date: query.minimum_last_changed_date,
    };

    let mut conn = state.db.acquire().await?;
    let weeks = db::list_weeks(&mut conn, &filter, page).await?;

    Ok(Json(weeks))
}
