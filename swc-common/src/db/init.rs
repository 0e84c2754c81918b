//! Database initialization
//!
//! The reconciliation task opens the store read-write and creates any
//! missing tables. The query service only ever opens it read-only.

use crate::{Error, Result};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// SQLite busy timeout applied to read-write pools
pub const BUSY_TIMEOUT_MS: u64 = 5000;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await?;

    // WAL lets the query service keep reading while a reconciliation run
    // holds its write transaction
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    sqlx::query(&format!("PRAGMA busy_timeout = {}", BUSY_TIMEOUT_MS))
        .execute(&pool)
        .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Connect to an existing database in read-only mode
pub async fn connect_readonly(db_path: &Path) -> Result<SqlitePool> {
    if !db_path.exists() {
        return Err(Error::Config(format!(
            "Database not found: {}\nRun swc-reconcile first to initialize the database.",
            db_path.display()
        )));
    }

    // mode=ro without immutable=1: committed reconciliation runs must stay visible
    let db_url = format!("sqlite://{}?mode=ro", db_path.display());

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    Ok(pool)
}

/// Create every table (idempotent)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_player_table(pool).await?;
    create_week_table(pool).await?;
    create_performance_table(pool).await?;
    create_league_table(pool).await?;
    create_team_table(pool).await?;
    create_team_player_table(pool).await?;
    Ok(())
}

async fn create_player_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS player (
            player_id INTEGER PRIMARY KEY,
            gsis_id TEXT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            position TEXT NOT NULL,
            last_changed_date TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_player_last_changed ON player(last_changed_date)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_week_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS week (
            week_number TEXT PRIMARY KEY,
            start_date TEXT NOT NULL,
            end_date TEXT NOT NULL,
            last_changed_date TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_performance_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS performance (
            performance_id INTEGER PRIMARY KEY,
            week_number TEXT NOT NULL,
            fantasy_points REAL NOT NULL,
            player_id INTEGER NOT NULL REFERENCES player(player_id),
            last_changed_date TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_performance_player ON performance(player_id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_league_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS league (
            league_id INTEGER PRIMARY KEY,
            league_name TEXT NOT NULL,
            scoring_type TEXT NOT NULL,
            last_changed_date TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_team_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS team (
            team_id INTEGER PRIMARY KEY,
            league_id INTEGER NOT NULL REFERENCES league(league_id),
            team_name TEXT NOT NULL,
            last_changed_date TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_team_league ON team(league_id)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_team_player_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS team_player (
            team_id INTEGER NOT NULL REFERENCES team(team_id),
            player_id INTEGER NOT NULL REFERENCES player(player_id),
            last_changed_date TEXT NOT NULL,
            PRIMARY KEY (team_id, player_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
