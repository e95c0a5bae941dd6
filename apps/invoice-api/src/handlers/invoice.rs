//! # Invoice Handlers
//!
//! Submitting a draft and reading stored invoices back.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::SharedState;
use invoice_core::validation::validate_invoice_id;
use invoice_core::{CoreError, Invoice, InvoiceDraft, InvoiceSummary};

/// `POST /api/invoices`: recomputes the submitted draft and stores it.
///
/// Derived values sent by the client are never trusted; they are recomputed
/// under the server's tax policy before storage.
pub async fn create(
    State(state): State<SharedState>,
    payload: Result<Json<InvoiceDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Invoice>), ApiError> {
    let Json(draft) = payload?;
    let draft = draft.recomputed(state.policy());

    let invoice = state.db().invoices().create(&draft).await?;
    info!(id = %invoice.id, items = invoice.items.len(), "Invoice submitted");

    Ok((StatusCode::CREATED, Json(invoice)))
}

/// `GET /api/invoices`: every stored invoice, newest first.
pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<InvoiceSummary>>, ApiError> {
    let invoices = state.db().invoices().list_all().await?;
    Ok(Json(invoices))
}

/// `GET /api/invoices/{id}`: one stored invoice.
///
/// ## Errors
/// - `VALIDATION_ERROR` (400) when `id` is not a UUID
/// - `NOT_FOUND` (404) when no invoice has that id
pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Invoice>, ApiError> {
    debug!(id = %id, "get invoice");
    validate_invoice_id(&id).map_err(CoreError::from)?;

    state
        .db()
        .invoices()
        .get_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| CoreError::InvoiceNotFound(id).into())
}
