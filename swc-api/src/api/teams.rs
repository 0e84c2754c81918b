//! Team endpoints

use axum::{extract::State, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use swc_common::db::{self, Team, TeamFilter};

use crate::{
    error::ApiError,
    extract::Query,
    pagination::{default_limit, page},
    AppState,
};

/// Query parameters for GET /teams/
#[derive(Debug, Deserialize)]
pub struct TeamsQuery {
    #[serde(default)]
    pub skip: i64,

    #[serde(default = "default_limit")]
    pub limit: i64,

    pub minimum_last_changed_date: Option<NaiveDate>,

    /// Unique within a league, not across leagues
    pub team_name: Option<String>,

    pub league_id: Option<i64>,
}

/// GET /teams/
pub async fn list_teams(
    State(state): State<AppState>,
    Query(query): Query<TeamsQuery>,
) -> Result<Json<Vec<Team>>, ApiError> {
    let page = page(query.skip, query.limit)?;
    let filter = TeamFilter {
        min_last_changed_date: query.minimum_last_changed_date,
        team_name: query.team_name,
        league_id: query.league_id,
    };

    let mut conn = state.db.acquire().await?;
    let teams = db::list_teams(&mut conn, &filter, page).await?;

    Ok(Json(teams))
}
