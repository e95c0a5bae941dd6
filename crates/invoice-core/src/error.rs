//! # Error Types
//!
//! Domain-specific error types for invoice-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  invoice-core errors (this file)                                       │
//! │  ├── CoreError        - Draft command / lookup failures                 │
//! │  └── ValidationError  - Malformed identifiers and configuration         │
//! │                                                                         │
//! │  invoice-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  invoice-api errors (in app)                                           │
//! │  └── ApiError         - What the browser sees (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Frontend     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Never Errors
//! Numeric form input. Anything unparseable coerces to zero (see
//! [`crate::coerce`]), so pricing itself has no error path.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A draft command addressed an item that does not exist.
    ///
    /// ## When This Occurs
    /// - The frontend sent `update_item` / `remove_item` for a stale index
    ///   (e.g. a double-click on "remove")
    #[error("Item index {index} out of range (draft has {len} items)")]
    ItemIndexOutOfRange { index: usize, len: usize },

    /// Invoice cannot be found.
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Invoice *contents* are not validated; these cover identifiers and
/// configuration only.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
