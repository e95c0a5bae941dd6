//! # HTTP Handlers
//!
//! Every route the browser form talks to.
//!
//! ## Handler Organization
//! ```text
//! handlers/
//! ├── mod.rs      ◄─── You are here (exports + health)
//! ├── draft.rs    ◄─── Draft editing (no storage)
//! └── invoice.rs  ◄─── Submit, list, fetch
//! ```
//!
//! ## How a Form Edit Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Browser                                    Server                      │
//! │                                                                         │
//! │  user types "100" in MRP of row 1                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  POST /api/drafts/apply ─────────────────►  draft::apply                │
//! │  { draft, command: update_item }                 │                      │
//! │                                                  ▼                      │
//! │                                            InvoiceDraft::apply          │
//! │                                                  │                      │
//! │  re-render  ◄──────────────────────────── new draft (JSON)              │
//! │       │                                                                 │
//! │  "Submit" ──► POST /api/invoices ────────►  invoice::create             │
//! │                                                  │ recompute + store    │
//! │  redirect to /invoices/{id} ◄──────────── 201 + stored invoice          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod draft;
pub mod invoice;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::warn;

use crate::state::SharedState;

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
}

/// Health check endpoint: `200` when the store answers, `503` otherwise.
pub async fn health(State(state): State<SharedState>) -> (StatusCode, Json<HealthResponse>) {
    if state.db().health_check().await {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                database: true,
            }),
        )
    } else {
        warn!("Health check failed: database unavailable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "degraded",
                database: false,
            }),
        )
    }
}
