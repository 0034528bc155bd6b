//! ecfr-api - Read-only query service for the eCFR corpus
//!
//! Loads the pre-extracted regulation table once, then serves search,
//! statistics, titles, checksums and readability over HTTP for the
//! explorer dashboard.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ecfr_common::config::{CliOverrides, ServiceConfig};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ecfr_api::{api::buildinfo::BuildInfo, build_router, AppState};

/// Command-line arguments for ecfr-api
///
/// Unset flags fall back to ECFR_* environment variables, then the config
/// file, then compiled defaults.
#[derive(Parser, Debug)]
#[command(name = "ecfr-api")]
#[command(about = "Read-only query service for the eCFR corpus")]
#[command(version)]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Input table (CSV, or JSON Lines with .jsonl/.ndjson extension)
    #[arg(short, long)]
    data_file: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// tracing filter used when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,
}

impl From<Args> for CliOverrides {
    fn from(args: Args) -> Self {
        CliOverrides {
            config_file: args.config,
            data_file: args.data_file,
            host: args.host,
            port: args.port,
            log_level: args.log_level,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = ServiceConfig::resolve(args.into()).context("Failed to resolve configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},tower_http=info", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting eCFR API (ecfr-api) {}", BuildInfo::current());
    info!("Data file: {}", config.data_file.display());

    // The table is fully loaded and normalized before anything can query it
    let table = match ecfr_common::load_table(&config.data_file) {
        Ok(table) => {
            info!("✓ Loaded {} records", table.len());
            table
        }
        Err(e) => {
            error!("Failed to load corpus: {}", e);
            return Err(e).context("Failed to load corpus");
        }
    };

    let state = AppState::new(table);
    let app = build_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("ecfr-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
