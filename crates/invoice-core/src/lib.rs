//! # invoice-core: Pure Pricing Logic for Invoices
//!
//! This crate holds everything about an invoice that can be computed without
//! touching the outside world: line item pricing, footer taxes, numeric
//! coercion of form input and the draft editing commands.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Invoice Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser Form                                 │   │
//! │  │    Company ──► Customer ──► Item Table ──► Footer ──► Submit    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP / JSON                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    invoice-api (axum)                           │   │
//! │  │    /api/drafts/*, /api/invoices, /api/invoices/{id}             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ invoice-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  pricing  │  │   draft   │  │  coerce   │  │   money   │  │   │
//! │  │   │ recompute │  │  command  │  │ text → n  │  │  Decimal  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 invoice-db (Database Layer)                     │   │
//! │  │              SQLite queries, migrations, repository             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Invoice, LineItem, FooterTotals, TaxPolicy)
//! - [`money`] - Exact decimal money
//! - [`pricing`] - Item and footer recomputation
//! - [`draft`] - Immutable draft + edit commands
//! - [`coerce`] - Free-form text to number
//! - [`error`] - Domain error types
//! - [`validation`] - Id, index and tax rate checks
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same items + same policy = same totals
//! 2. **No I/O**: storage and transport live in other crates
//! 3. **Exact Decimals**: no floating point anywhere near a price
//! 4. **Forgiving Input**: bad numeric text is zero, never an error
//!
//! ## Example Usage
//!
//! ```rust
//! use invoice_core::{DraftCommand, InvoiceDraft, ItemField, TaxPolicy};
//!
//! let policy = TaxPolicy::default(); // 9% CGST + 9% IGST
//! let draft = InvoiceDraft::new()
//!     .apply(DraftCommand::AddItem, &policy)?
//!     .apply(DraftCommand::UpdateItem { index: 0, field: ItemField::Mrp("100".into()) }, &policy)?
//!     .apply(DraftCommand::UpdateItem { index: 0, field: ItemField::Discount("10".into()) }, &policy)?
//!     .apply(DraftCommand::UpdateItem { index: 0, field: ItemField::Quantity("2".into()) }, &policy)?;
//!
//! assert_eq!(draft.items[0].final_rate.to_string(), "180.00");
//! assert_eq!(draft.footer.total_after_tax.to_string(), "212.40");
//! # Ok::<(), invoice_core::CoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod coerce;
pub mod draft;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use draft::{CompanyField, CustomerField, DraftCommand, InvoiceDraft, ItemField};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default CGST component: 900 bps (9%).
pub const DEFAULT_CGST_BPS: u32 = 900;

/// Default IGST component: 900 bps (9%).
pub const DEFAULT_IGST_BPS: u32 = 900;
