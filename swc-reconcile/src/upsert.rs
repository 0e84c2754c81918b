//! Player upsert
//!
//! A record whose `player_id` already exists overwrites that row; otherwise
//! it is inserted. Within one batch a repeated `player_id` leaves the later
//! record's values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{Sqlite, SqlitePool, Transaction};
use swc_common::{Error, Result};
use tracing::{debug, error, info, warn};

/// One player as delivered by the upstream feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub player_id: i64,
    #[serde(default)]
    pub gsis_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub last_changed_date: NaiveDate,
}

/// Outcome of a committed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Records applied, counting each occurrence of a repeated identifier
    pub applied: usize,
}

/// Apply a JSON array of player records in one transaction
///
/// An absent, blank or empty-array payload fails with [`Error::EmptyBatch`].
/// The first record that cannot be decoded or stored aborts the run and
/// rolls back everything written so far.
pub async fn upsert_player_data(
    pool: &SqlitePool,
    payload: Option<&str>,
) -> Result<ReconcileReport> {
    let payload = match payload.map(str::trim) {
        Some(payload) if !payload.is_empty() => payload,
        _ => {
            warn!("No player data received");
            return Err(Error::EmptyBatch);
        }
    };

    let elements: Vec<Value> = serde_json::from_str(payload).map_err(|e| {
        error!("Player payload is not a JSON array: {}", e);
        Error::Json(e)
    })?;

    if elements.is_empty() {
        warn!("Player batch is empty");
        return Err(Error::EmptyBatch);
    }

    info!("Reconciling {} player records", elements.len());

    // Dropping the transaction on an early return rolls it back
    let mut tx = pool.begin().await?;
    let mut applied = 0;

    for (index, element) in elements.into_iter().enumerate() {
        let record = decode_record(index, element)?;
        upsert_player(&mut tx, &record).await?;
        applied += 1;
    }

    tx.commit().await?;

    info!("Committed {} player records", applied);
    Ok(ReconcileReport { applied })
}

fn decode_record(index: usize, element: Value) -> Result<PlayerRecord> {
    let player_id = element.get("player_id").and_then(Value::as_i64);

    serde_json::from_value(element).map_err(|source| {
        error!(
            "Invalid player record at index {} (player_id {:?}): {}",
            index, player_id, source
        );
        Error::InvalidRecord {
            index,
            player_id,
            source,
        }
    })
}

async fn upsert_player(tx: &mut Transaction<'_, Sqlite>, record: &PlayerRecord) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO player (
            player_id, gsis_id, first_name, last_name, position, last_changed_date
        ) VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT(player_id) DO UPDATE SET
            gsis_id = excluded.gsis_id,
            first_name = excluded.first_name,
            last_name = excluded.last_name,
            position = excluded.position,
            last_changed_date = excluded.last_changed_date
        "#,
    )
    .bind(record.player_id)
    .bind(&record.gsis_id)
    .bind(&record.first_name)
    .bind(&record.last_name)
    .bind(&record.position)
    .bind(record.last_changed_date)
    .execute(&mut **tx)
    .await
    .map_err(|source| {
        error!("Failed to upsert player {}: {}", record.player_id, source);
        Error::Upsert {
            player_id: record.player_id,
            source,
        }
    })?;

    debug!("Upserted player {}", record.player_id);
    Ok(())
}
