//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    360 × 1.18 = 424.79999999999995  ❌ WRONG!                           │
//! │                                                                         │
//! │  Integer cents do not help either: a 12.5% discount on 0.99 × 1.5      │
//! │  units is not a whole number of cents.                                  │
//! │                                                                         │
//! │  OUR SOLUTION: Exact base-10 decimals (rust_decimal)                    │
//! │    360 × 1.18 = 424.80 exactly                                          │
//! │    Rounding happens only when a value is displayed                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use invoice_core::money::Money;
//! use rust_decimal::Decimal;
//!
//! let mrp = Money::new(Decimal::new(9999, 2)); // 99.99
//! let line = mrp.multiply_quantity(Decimal::from(3));
//! assert_eq!(line.to_string(), "299.97");
//! ```
//!
//! ## Overflow
//! All arithmetic saturates instead of panicking. Inputs come straight from
//! form fields and the engine must never fail on them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use ts_rs::TS;

use crate::types::TaxRate;

/// Number of decimal places shown when money is displayed.
pub const DISPLAY_DECIMALS: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in the invoice's single currency.
///
/// ## Design Decisions
/// - **Decimal**: exact, signed (negative values are representable even
///   though the form never produces them)
/// - **Single field tuple struct**: zero-cost wrapper; serde treats it as a
///   newtype so the JSON shape is just the decimal string
/// - **No rounding**: values keep full precision; [`Money::rounded`] and
///   `Display` are the only places that round
///
/// ## Where Money is Used
/// ```text
/// LineItem.mrp ──► rate_after_discount ──► final_rate ──┐
///                                                        ▼
///                        FooterTotals { total_before_tax, cgst, igst,
///                                       total_after_tax }
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(#[ts(as = "String")] Decimal);

impl Money {
    /// Zero.
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Wraps a decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money::ZERO
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Multiplies money by a quantity.
    ///
    /// Quantities are decimals: fractional quantities (1.5 kg) multiply
    /// through arithmetically.
    ///
    /// ## Example
    /// ```rust
    /// use invoice_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let rate = Money::new(Decimal::from(90));
    /// assert_eq!(rate.multiply_quantity(Decimal::from(2)), Money::new(Decimal::from(180)));
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: Decimal) -> Money {
        Money(self.0.saturating_mul(qty).normalize())
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// `amount × (1 − percent / 100)`
    ///
    /// ## Example
    /// ```rust
    /// use invoice_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let mrp = Money::new(Decimal::from(100));
    /// let discounted = mrp.apply_percentage_discount(Decimal::from(10));
    /// assert_eq!(discounted, Money::new(Decimal::from(90)));
    /// ```
    pub fn apply_percentage_discount(&self, percent: Decimal) -> Money {
        let factor = Decimal::ONE - percent / Decimal::ONE_HUNDRED;
        Money(self.0.saturating_mul(factor).normalize())
    }

    /// Calculates tax at the given rate.
    ///
    /// The result is exact; no rounding is applied.
    ///
    /// ## Example
    /// ```rust
    /// use invoice_core::money::Money;
    /// use invoice_core::types::TaxRate;
    /// use rust_decimal::Decimal;
    ///
    /// let pre_tax = Money::new(Decimal::from(360));
    /// let cgst = pre_tax.calculate_tax(TaxRate::from_bps(900));
    /// assert_eq!(cgst, Money::new(Decimal::new(324, 1))); // 32.4
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        Money(self.0.saturating_mul(rate.as_fraction()).normalize())
    }

    /// Returns the amount rounded to [`DISPLAY_DECIMALS`] places
    /// (midpoint away from zero, the way printed invoices round).
    pub fn rounded(&self) -> Decimal {
        self.0.round_dp_with_strategy(
            DISPLAY_DECIMALS,
            rust_decimal::RoundingStrategy::MidpointAwayFromZero,
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount with exactly two decimal places: `424.80`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rounded = self.rounded();
        rounded.rescale(DISPLAY_DECIMALS);
        write!(f, "{}", rounded)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0).normalize())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn money(s: &str) -> Money {
        Money::new(s.parse().unwrap())
    }

    #[test]
    fn test_display() {
        assert_eq!(money("424.8").to_string(), "424.80");
        assert_eq!(money("5").to_string(), "5.00");
        assert_eq!(money("-5.5").to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
        assert_eq!(money("0.125").to_string(), "0.13");
    }

    #[test]
    fn test_arithmetic() {
        let a = money("10.00");
        let b = money("5.50");

        assert_eq!(a + b, money("15.5"));
        assert_eq!(a.multiply_quantity(Decimal::from(3)), money("30"));
    }

    #[test]
    fn test_float_drift_is_absent() {
        // 0.1 + 0.2 in floating point is 0.30000000000000004
        assert_eq!(money("0.1") + money("0.2"), money("0.3"));
        // 360 × 1.18 in floating point is 424.79999999999995
        let total = money("360") + money("360").calculate_tax(TaxRate::from_bps(1800));
        assert_eq!(total, money("424.8"));
    }

    #[test]
    fn test_fractional_quantity() {
        let rate = money("12.40");
        assert_eq!(rate.multiply_quantity("1.5".parse().unwrap()), money("18.6"));
    }

    #[test]
    fn test_percentage_discount() {
        let mrp = money("100");
        assert_eq!(mrp.apply_percentage_discount(Decimal::from(10)), money("90"));
        assert_eq!(mrp.apply_percentage_discount(Decimal::ZERO), mrp);
        assert_eq!(mrp.apply_percentage_discount(Decimal::ONE_HUNDRED), Money::zero());
    }

    #[test]
    fn test_tax_calculation() {
        let pre_tax = money("360");
        assert_eq!(pre_tax.calculate_tax(TaxRate::from_bps(900)), money("32.4"));
        assert_eq!(pre_tax.calculate_tax(TaxRate::zero()), Money::zero());
    }

    #[test]
    fn test_saturates_instead_of_panicking() {
        let huge = Money::new(Decimal::MAX);
        assert_eq!(huge + huge, Money::new(Decimal::MAX));
        assert_eq!(huge.multiply_quantity(Decimal::from(10)), Money::new(Decimal::MAX));
    }

    #[test]
    fn test_sum() {
        let items = [money("1.10"), money("2.20"), money("3.30")];
        let total: Money = items.iter().sum();
        assert_eq!(total, money("6.6"));

        let empty: [Money; 0] = [];
        assert_eq!(empty.iter().sum::<Money>(), Money::zero());
    }

    #[test]
    fn test_serializes_as_decimal_string() {
        let json = serde_json::to_string(&money("32.4")).unwrap();
        assert_eq!(json, "\"32.4\"");

        let back: Money = serde_json::from_str("\"32.40\"").unwrap();
        assert_eq!(back, money("32.4"));
    }
}
