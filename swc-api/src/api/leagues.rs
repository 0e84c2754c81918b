//! League endpoints

use axum::{extract::State, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use swc_common::db::{self, League, LeagueFilter};

use crate::{
    error::ApiError,
    extract::{Path, Query},
    pagination::{default_limit, page},
    AppState,
};

/// Query parameters for GET /leagues/
#[derive(Debug, Deserialize)]
pub struct LeaguesQuery {
    #[serde(default)]
    pub skip: i64,

    #[serde(default = "default_limit")]
    pub limit: i64,

    pub minimum_last_changed_date: Option<NaiveDate>,

    /// League names are not unique
    pub league_name: Option<String>,
}

/// GET /leagues/
pub async fn list_leagues(
    State(state): State<AppState>,
    Query(query): Query<LeaguesQuery>,
) -> Result<Json<Vec<League>>, ApiError> {
    let page = page(query.skip, query.limit)?;
    let filter = LeagueFilter {
        min_last_changed_date: query.minimum_last_changed_date,
        league_name: query.league_name,
    };

    let mut conn = state.db.acquire().await?;
    let leagues = db::list_leagues(&mut conn, &filter, page).await?;

    Ok(Json(leagues))
}

/// GET /leagues/:league_id
pub async fn get_league(
    State(state): State<AppState>,
    Path(league_id): Path<i64>,
) -> Result<Json<League>, ApiError> {
    let mut conn = state.db.acquire().await?;

    db::get_league(&mut conn, league_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("League not found".to_string()))
}
