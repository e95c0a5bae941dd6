//! # Invoice API Server
//!
//! Entry point for the HTTP server.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Server Startup                                    │
//! │                                                                         │
//! │  1. Initialize Logging ──► tracing-subscriber, RUST_LOG overrides       │
//! │  2. Load Config ─────────► --config <path> / platform dir, then env     │
//! │  3. Open Database ───────► SQLite (WAL), pending migrations applied     │
//! │  4. Build Router ────────► handlers + TraceLayer + shared state         │
//! │  5. Serve ───────────────► until Ctrl+C / SIGTERM, then drain + close   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```bash
//! invoice-api                          # defaults + platform config file
//! invoice-api --config ./invoice.toml  # explicit config file
//! INVOICE_PORT=9000 invoice-api        # env override
//! ```

use std::path::PathBuf;

use tokio::net::TcpListener;
use tracing::info;

use invoice_api::config::ApiConfig;
use invoice_api::state::AppState;
use invoice_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    invoice_api::init_tracing();

    info!("Starting invoice API server");

    let config = ApiConfig::load(config_path_from_args())?;
    let db_path = config.database_path()?;
    info!(
        addr = %config.server.bind_address(),
        db_path = %db_path.display(),
        cgst_bps = config.tax.cgst_bps,
        igst_bps = config.tax.igst_bps,
        combined_bps = config.tax_policy().combined().bps(),
        "Configuration loaded"
    );

    let db = Database::new(DbConfig::new(db_path)).await?;
    info!(
        migrations = db.applied_migrations().await?,
        "Database connected"
    );

    let state = AppState::new(db.clone(), config.tax_policy());
    let app = invoice_api::router(state);

    let listener = TcpListener::bind(config.server.bind_address()).await?;
    info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Reads `--config <path>` (or `-c <path>`) from the command line.
fn config_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" || arg == "-c" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
