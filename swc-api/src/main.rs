//! swc-api - read-only SWC fantasy football query service
//!
//! Serves the analytics store populated by swc-reconcile. The store is opened
//! read-only; each request checks out one pooled connection and returns it
//! when the response is built, on success and error alike.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use swc_api::{build_router, AppState};
use swc_common::config::ConfigResolver;
use swc_common::db::connect_readonly;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Command-line arguments; each overrides the environment and config file
#[derive(Debug, Parser)]
#[command(name = "swc-api", version, about = "SWC fantasy football read-only API")]
struct Args {
    /// SQLite database file
    #[arg(long)]
    database: Option<PathBuf>,

    /// Root data folder (database defaults to swc.db inside it)
    #[arg(long)]
    root_folder: Option<PathBuf>,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen address, e.g. 127.0.0.1:5740
    #[arg(long)]
    bind: Option<String>,

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

    // Log build identification immediately after tracing init
    info!(
        "Starting SWC API (swc-api) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    for warning in config.warnings() {
        warn!("{}", warning);
    }

    let db_path = config.database_path(args.database.as_deref(), args.root_folder.as_deref());
    info!("Database path: {}", db_path.display());

    let pool = match connect_readonly(&db_path).await {
        Ok(pool) => {
            info!("Connected to database (read-only)");
            pool
        }
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    let state = AppState::new(pool);
    let app = build_router(state);

    let bind_addr = config.bind_addr(args.bind.as_deref());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("swc-api listening on http://{}", bind_addr);
    info!("Health check: http://{}/health", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown"),
        _ = terminate => info!("Received SIGTERM, starting shutdown"),
    }
}
