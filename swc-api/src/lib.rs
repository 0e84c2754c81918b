//! swc-api library - read-only query service
//!
//! Serves players, performances, leagues, teams, weeks and table counts
//! from the SWC analytics store. Nothing here writes to the store.

use axum::{routing::get, Router};
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod api;
pub mod error;
pub mod extract;
pub mod pagination;

pub use error::ApiError;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool; each request checks out one connection
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Routes served both at the root and under `/v0`
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(api::health::root))
        .merge(api::health::health_routes())
        .route("/players/", get(api::players::list_players))
        .route("/players", get(api::players::list_players))
        .route("/players/:player_id", get(api::players::get_player))
        .route("/performances/", get(api::performances::list_performances))
        .route("/performances", get(api::performances::list_performances))
        .route("/leagues/", get(api::leagues::list_leagues))
        .route("/leagues", get(api::leagues::list_leagues))
        .route("/leagues/:league_id", get(api::leagues::get_league))
        .route("/teams/", get(api::teams::list_teams))
        .route("/teams", get(api::teams::list_teams))
        .route("/weeks/", get(api::weeks::list_weeks))
        .route("/weeks", get(api::weeks::list_weeks))
        .route("/counts/", get(api::counts::get_counts))
        .route("/counts", get(api::counts::get_counts))
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let routes = api_routes();

    Router::new()
        .merge(routes.clone())
        .nest("/v0", routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
