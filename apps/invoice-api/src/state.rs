//! # Application State
//!
//! Shared state handed to every handler through axum's `State` extractor.
//!
//! ## Thread Safety
//! `Database` wraps a `SqlitePool`, which is already safe to share. The tax
//! policy is read-only after startup. The whole state sits behind one `Arc`,
//! so cloning it per request is a pointer copy and no locking is involved.

use std::sync::Arc;

use invoice_core::TaxPolicy;
use invoice_db::Database;

/// Everything a handler may need.
#[derive(Debug)]
pub struct AppState {
    db: Database,
    policy: TaxPolicy,
}

/// The form handlers receive.
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Creates the shared state.
    pub fn new(db: Database, policy: TaxPolicy) -> SharedState {
        Arc::new(AppState { db, policy })
    }

    /// The invoice store.
    pub fn db(&self) -> &Database {
        &self.db
    }

    /// The tax policy every draft is priced with.
    pub fn policy(&self) -> &TaxPolicy {
        &self.policy
    }
}
