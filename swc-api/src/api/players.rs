//! Player endpoints
//!
//! Player names are not unique. Player IDs are internal identifiers: they are
//! not guaranteed to be sequential and must not be used for counting.

use axum::{extract::State, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use swc_common::db::{self, Player, PlayerFilter};

use crate::{
    error::ApiError,
    extract::{Path, Query},
    pagination::{default_limit, page},
    AppState,
};

/// Query parameters for GET /players/
#[derive(Debug, Deserialize)]
pub struct PlayersQuery {
    /// Matching rows to skip from the start
    #[serde(default)]
    pub skip: i64,

    /// Rows to return after skipping
    #[serde(default = "default_limit")]
    pub limit: i64,

    /// Exclude records changed before this date
    pub minimum_last_changed_date: Option<NaiveDate>,

    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// GET /players/
pub async fn list_players(
    State(state): State<AppState>,
    Query(query): Query<PlayersQuery>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let page = page(query.skip, query.limit)?;
    let filter = PlayerFilter {
        min_last_changed_date: query.minimum_last_changed_date,
        first_name: query.first_name,
        last_name: query.last_name,
    };

    let mut conn = state.db.acquire().await?;
    let players = db::list_players(&mut conn, &filter, page).await?;

    Ok(Json(players))
}

/// GET /players/:player_id
pub async fn get_player(
    State(state): State<AppState>,
    Path(player_id): Path<i64>,
) -> Result<Json<Player>, ApiError> {
    let mut conn = state.db.acquire().await?;

    db::get_player(&mut conn, player_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Player not found".to_string()))
}
