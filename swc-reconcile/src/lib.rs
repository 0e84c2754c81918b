//! swc-reconcile - player data reconciliation
//!
//! Applies a batch of player records to the analytics store. The batch is
//! written in a single transaction: either every record lands or none do.

pub mod source;
pub mod upsert;

pub use source::BatchSource;
pub use upsert::{upsert_player_data, PlayerRecord, ReconcileReport};
