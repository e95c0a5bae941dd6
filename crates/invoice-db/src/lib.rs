//! # invoice-db: Invoice Store
//!
//! This crate stores submitted invoices in SQLite and reads them back.
//! It uses sqlx for async access and embeds its migrations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Invoice Data Flow                                │
//! │                                                                         │
//! │  POST /api/invoices (recomputed draft)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     invoice-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repository   │    │    Schema    │  │   │
//! │  │   │   (pool.rs)   │    │ (invoice.rs)  │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ InvoiceRepo   │    │ 001_...sql   │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │          invoices  ◄──1:N──  invoice_items                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Store connection and embedded schema
//! - [`error`] - Database error types
//! - [`repository`] - Invoice repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use invoice_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/invoices.db")).await?;
//!
//! let invoice = db.invoices().create(&draft).await?;
//! let same = db.invoices().get_by_id(&invoice.id).await?;
//! let all = db.invoices().list_all().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::invoice::InvoiceRepository;
