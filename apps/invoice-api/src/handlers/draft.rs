//! # Draft Handlers
//!
//! Stateless editing: the browser sends the current draft with each edit
//! and gets the next one back. Nothing here touches the database.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::SharedState;
use invoice_core::{DraftCommand, InvoiceDraft};

/// Body of `POST /api/drafts/apply`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplyRequest {
    pub draft: InvoiceDraft,
    pub command: DraftCommand,
}

/// `GET /api/drafts/new`: an empty draft.
pub async fn new_draft() -> Json<InvoiceDraft> {
    Json(InvoiceDraft::new())
}

/// `POST /api/drafts/apply`: applies one edit command.
pub async fn apply(
    State(state): State<SharedState>,
    payload: Result<Json<ApplyRequest>, JsonRejection>,
) -> Result<Json<InvoiceDraft>, ApiError> {
    let Json(ApplyRequest { draft, command }) = payload?;
    debug!(?command, items = draft.items.len(), "apply draft command");

    let next = draft.apply(command, state.policy())?;
    Ok(Json(next))
}

/// `POST /api/drafts/recompute`: returns the draft with all derived values
/// recomputed.
pub async fn recompute(
    State(state): State<SharedState>,
    payload: Result<Json<InvoiceDraft>, JsonRejection>,
) -> Result<Json<InvoiceDraft>, ApiError> {
    let Json(draft) = payload?;
    Ok(Json(draft.recomputed(state.policy())))
}
