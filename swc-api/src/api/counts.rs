//! Table counts endpoint
//!
//! Use these totals together with skip/limit instead of paging through a
//! whole table to count it.

use axum::{extract::State, Json};
use swc_common::db::{self, Counts};

use crate::{error::ApiError, AppState};

/// GET /counts/
pub async fn get_counts(State(state): State<AppState>) -> Result<Json<Counts>, ApiError> {
    let mut conn = state.db.acquire().await?;
    let counts = db::get_counts(&mut conn).await?;

    Ok(Json(counts))
}
