//! # Invoice API Library
//!
//! HTTP/JSON service in front of the pricing engine and the invoice store.
//!
//! ## Module Organization
//! ```text
//! invoice_api/
//! ├── lib.rs          ◄─── You are here (router + tracing setup)
//! ├── config.rs       ◄─── TOML + environment configuration
//! ├── state.rs        ◄─── Shared handler state
//! ├── handlers/       ◄─── Route handlers
//! └── error.rs        ◄─── API error type
//! ```
//!
//! ## Routes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET  /health                 store health check                        │
//! │  GET  /api/drafts/new         empty draft                               │
//! │  POST /api/drafts/apply       {draft, command} → next draft             │
//! │  POST /api/drafts/recompute   draft → recomputed draft                  │
//! │  POST /api/invoices           draft → 201 stored invoice                │
//! │  GET  /api/invoices           summaries, newest first                   │
//! │  GET  /api/invoices/{id}      one invoice, 404 when missing             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::state::SharedState;

/// Builds the application router.
pub fn router(state: SharedState) -> Router {
    let api = Router::new()
        .route("/drafts/new", get(handlers::draft::new_draft))
        .route("/drafts/apply", post(handlers::draft::apply))
        .route("/drafts/recompute", post(handlers::draft::recompute))
        .route(
            "/invoices",
            get(handlers::invoice::list).post(handlers::invoice::create),
        )
        .route("/invoices/{id}", get(handlers::invoice::get));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=invoice=trace` - Show trace for invoice crates only
/// - Default: `info,invoice=debug,sqlx=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,invoice=debug,tower_http=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
