//! # Domain Types
//!
//! Core domain types used throughout the invoice workspace.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Invoice      │   │    LineItem     │   │  FooterTotals   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  serial         │   │  before tax     │       │
//! │  │  company        │   │  mrp            │   │  cgst           │       │
//! │  │  customer       │   │  discount %     │   │  igst           │       │
//! │  │  items[]        │   │  quantity       │   │  after tax      │       │
//! │  │  footer         │   │  (derived ×2)   │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │    TaxRate      │   │   TaxPolicy     │                              │
//! │  │  bps (u32)      │   │  cgst + igst    │                              │
//! │  │  900 = 9%       │   │  900 + 900 bps  │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Derived Fields
//! `LineItem::rate_after_discount` and `LineItem::final_rate` are never set
//! directly. They are written only by [`crate::pricing::recompute_item`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 900 bps = 9% (one half of the 18% GST slab)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a fraction (900 bps → 0.09).
    #[inline]
    pub fn as_fraction(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 4)
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Tax Policy
// =============================================================================

/// The two parallel tax components applied to the post-discount total.
///
/// Both are configuration, never derived from item data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxPolicy {
    /// Central GST component.
    pub cgst: TaxRate,
    /// Integrated GST component.
    pub igst: TaxRate,
}

impl TaxPolicy {
    /// Creates a policy from two rates.
    pub const fn new(cgst: TaxRate, igst: TaxRate) -> Self {
        TaxPolicy { cgst, igst }
    }

    /// Combined rate of both components.
    pub const fn combined(&self) -> TaxRate {
        TaxRate::from_bps(self.cgst.bps().saturating_add(self.igst.bps()))
    }
}

impl Default for TaxPolicy {
    fn default() -> Self {
        TaxPolicy::new(
            TaxRate::from_bps(crate::DEFAULT_CGST_BPS),
            TaxRate::from_bps(crate::DEFAULT_IGST_BPS),
        )
    }
}

// =============================================================================
// Parties
// =============================================================================

/// The issuing company.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Company {
    pub name: String,
    pub address: String,
    pub contact: String,
}

/// The billed customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customer {
    pub name: String,
    pub address: String,
    pub contact: String,
    /// PAN or GST registration number.
    pub tax_id: String,
}

// =============================================================================
// Line Item
// =============================================================================

/// A line on the invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Positional display label ("1", "2", ...). Not an identifier and
    /// never renumbered.
    pub serial: String,

    pub description: String,

    /// Maximum retail price: the pre-discount unit price.
    pub mrp: Money,

    /// Discount in percent, kept within 0..=100.
    #[ts(as = "String")]
    pub discount_percent: Decimal,

    /// Derived: `mrp × (1 − discount_percent / 100)`.
    pub rate_after_discount: Money,

    /// Accepts fractional values.
    #[ts(as = "String")]
    pub quantity: Decimal,

    /// Derived: `rate_after_discount × quantity`.
    pub final_rate: Money,
}

impl LineItem {
    /// Creates an empty line with the given serial.
    pub fn blank(serial: impl Into<String>) -> Self {
        LineItem {
            serial: serial.into(),
            description: String::new(),
            mrp: Money::zero(),
            discount_percent: Decimal::ZERO,
            rate_after_discount: Money::zero(),
            quantity: Decimal::ZERO,
            final_rate: Money::zero(),
        }
    }

    /// Undiscounted line value: `mrp × quantity`.
    #[inline]
    pub fn gross(&self) -> Money {
        self.mrp.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Footer Totals
// =============================================================================

/// Aggregate totals shown under the item table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FooterTotals {
    /// `Σ mrp × quantity` (undiscounted).
    pub total_before_tax: Money,
    pub cgst: Money,
    pub igst: Money,
    /// `Σ final_rate + cgst + igst`.
    pub total_after_tax: Money,
}

impl FooterTotals {
    /// All-zero footer (the footer of an empty invoice).
    pub const fn zero() -> Self {
        FooterTotals {
            total_before_tax: Money::ZERO,
            cgst: Money::ZERO,
            igst: Money::ZERO,
            total_after_tax: Money::ZERO,
        }
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// A submitted invoice. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Invoice {
    /// UUID v4 assigned by the store.
    pub id: String,
    pub company: Company,
    pub customer: Customer,
    pub items: Vec<LineItem>,
    pub footer: FooterTotals,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// One row of the invoice list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceSummary {
    pub id: String,
    pub company_name: String,
    pub customer_name: String,
    pub item_count: i64,
    pub total_after_tax: Money,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl From<&Invoice> for InvoiceSummary {
    fn from(invoice: &Invoice) -> Self {
        InvoiceSummary {
            id: invoice.id.clone(),
            company_name: invoice.company.name.clone(),
            customer_name: invoice.customer.name.clone(),
            item_count: invoice.items.len() as i64,
            total_after_tax: invoice.footer.total_after_tax,
            created_at: invoice.created_at,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(900);
        assert_eq!(rate.bps(), 900);
        assert_eq!(rate.as_fraction(), Decimal::new(9, 2));
    }

    #[test]
    fn test_default_policy_is_nine_and_nine() {
        let policy = TaxPolicy::default();
        assert_eq!(policy.cgst.bps(), 900);
        assert_eq!(policy.igst.bps(), 900);
        assert_eq!(policy.combined().bps(), 1800);
    }

    #[test]
    fn test_blank_item() {
        let item = LineItem::blank("3");
        assert_eq!(item.serial, "3");
        assert!(item.description.is_empty());
        assert!(item.mrp.is_zero());
        assert!(item.final_rate.is_zero());
        assert!(item.gross().is_zero());
    }

    #[test]
    fn test_zero_footer() {
        assert_eq!(FooterTotals::zero(), FooterTotals::default());
        assert!(FooterTotals::zero().total_after_tax.is_zero());
    }

    #[test]
    fn test_summary_from_invoice() {
        let invoice = Invoice {
            id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            company: Company {
                name: "Acme Traders".to_string(),
                ..Company::default()
            },
            customer: Customer {
                name: "R. Sharma".to_string(),
                ..Customer::default()
            },
            items: vec![LineItem::blank("1"), LineItem::blank("2")],
            footer: FooterTotals::zero(),
            created_at: Utc::now(),
        };

        let summary = InvoiceSummary::from(&invoice);
        assert_eq!(summary.company_name, "Acme Traders");
        assert_eq!(summary.customer_name, "R. Sharma");
        assert_eq!(summary.item_count, 2);
    }

    #[test]
    fn test_line_item_json_shape() {
        let json = serde_json::to_value(LineItem::blank("1")).unwrap();
        assert_eq!(json["serial"], "1");
        assert_eq!(json["mrp"], "0");
        assert!(json.get("discount_percent").is_some());
        assert!(json.get("rate_after_discount").is_some());
    }
}
