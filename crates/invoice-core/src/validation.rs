//! # Validation Module
//!
//! The few checks this workspace performs. Invoice contents are *not*
//! validated: numeric fields are coerced (see [`crate::coerce`]) and text
//! fields are taken as typed. What is checked here:
//!
//! - invoice ids on the way into a store lookup
//! - tax rates coming from configuration
//! - item indexes carried by draft commands
//!
//! ## Usage
//! ```rust
//! use invoice_core::validation::{validate_invoice_id, validate_tax_rate_bps};
//!
//! assert!(validate_invoice_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
//! assert!(validate_tax_rate_bps(900).is_ok());
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Upper bound for a single tax component (100%).
pub const MAX_TAX_RATE_BPS: u32 = 10_000;

/// Validates an invoice id (UUID, as assigned by the store).
///
/// ## Example
/// ```rust
/// use invoice_core::validation::validate_invoice_id;
///
/// assert!(validate_invoice_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_invoice_id("not-a-uuid").is_err());
/// ```
pub fn validate_invoice_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > MAX_TAX_RATE_BPS {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: i64::from(MAX_TAX_RATE_BPS),
        });
    }

    Ok(())
}

/// Checks that `index` addresses an item of a list of length `len`.
pub fn validate_item_index(index: usize, len: usize) -> CoreResult<()> {
    if index >= len {
        return Err(CoreError::ItemIndexOutOfRange { index, len });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
