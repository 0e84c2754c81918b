//! Common error types for SWC

use thiserror::Error;

/// Common result type for SWC operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the query service and the reconciliation task
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Batch payload is not a JSON array
    #[error("Malformed player payload: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Reconciliation run received no player data
    #[error("No player data found; the task failed because the batch was empty")]
    EmptyBatch,

    /// A batch element could not be decoded into a player record
    #[error("Invalid player record at index {index} (player_id {player_id:?}): {source}")]
    InvalidRecord {
        index: usize,
        player_id: Option<i64>,
        source: serde_json::Error,
    },

    /// The store rejected the upsert of one player
    #[error("Failed to upsert player {player_id}: {source}")]
    Upsert {
        player_id: i64,
        source: sqlx::Error,
    },

    /// Upstream feed request failed
    #[error("Fetch error: {0}")]
    Fetch(String),
}
