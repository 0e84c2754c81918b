//! swc-reconcile - apply a player batch to the SWC analytics store
//!
//! Runs once per invocation; an external scheduler decides when. Exits
//! non-zero on any failure so the scheduler can retry the run as a whole.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use swc_common::config::ConfigResolver;
use swc_common::db::init_database;
use swc_reconcile::{upsert_player_data, BatchSource};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "swc-reconcile",
    version,
    about = "Upsert a batch of SWC player records"
)]
struct Args {
    /// JSON array of players: a file path, `-` for stdin, or an http(s) URL
    #[arg(long, default_value = "-")]
    input: String,

    /// SQLite database file
    #[arg(long)]
    database: Option<PathBuf>,

    /// Root data folder (database defaults to swc.db inside it)
    #[arg(long)]
    root_folder: Option<PathBuf>,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Default log level when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = ConfigResolver::new(args.config.as_deref());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level(args.log_level.as_deref()))),
        )
        .init();

    info!(
        "Starting SWC reconciliation (swc-reconcile) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    for warning in config.warnings() {
        warn!("{}", warning);
    }

    let db_path = config.database_path(args.database.as_deref(), args.root_folder.as_deref());
    info!("Database: {}", db_path.display());

    let pool = init_database(&db_path).await?;

    let payload = BatchSource::parse(&args.input).read().await?;

    let result = upsert_player_data(&pool, Some(&payload)).await;
    pool.close().await;

    match result {
        Ok(report) => {
            info!("Reconciliation complete: {} players applied", report.applied);
            Ok(())
        }
        Err(e) => {
            error!("Reconciliation failed: {}", e);
            Err(e.into())
        }
    }
}
