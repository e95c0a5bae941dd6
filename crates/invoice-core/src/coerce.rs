//! # Numeric Coercion
//!
//! Turns whatever the user typed into a numeric field into a number.
//! This never fails: text without a usable number becomes zero.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Input            Result     Why                                        │
//! │  ───────────────  ─────────  ───────────────────────────────────────    │
//! │  "12.5"           12.5       plain number                               │
//! │  "  7"            7          leading whitespace skipped                 │
//! │  "12abc"          12         longest numeric prefix wins                │
//! │  ".5" / "-.5"     0.5 / -0.5 missing integer part is fine               │
//! │  "1e3"            1000       exponent notation                          │
//! │  "5." / "5e"      5          dangling '.' / 'e' ignored                 │
//! │  "" / "abc"       0          no numeric prefix                          │
//! │  "NaN"/"Infinity" 0          not representable                          │
//! │  "1e400"          0          out of range                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! These are the semantics a browser number field gives through
//! `parseFloat(value) || 0`, minus float rounding.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Largest power of ten a `Decimal` can be scaled by.
const MAX_EXPONENT: u32 = 28;

/// Coerces free-form text into a decimal, defaulting to zero.
///
/// ## Example
/// ```rust
/// use invoice_core::coerce::coerce_decimal;
/// use rust_decimal::Decimal;
///
/// assert_eq!(coerce_decimal("12.5"), Decimal::new(125, 1));
/// assert_eq!(coerce_decimal("12abc"), Decimal::from(12));
/// assert_eq!(coerce_decimal("abc"), Decimal::ZERO);
/// ```
pub fn coerce_decimal(input: &str) -> Decimal {
    parse_prefix(input.trim_start()).unwrap_or(Decimal::ZERO)
}

/// Coerces an amount that cannot be negative (MRP, quantity).
///
/// Negative input becomes zero.
pub fn coerce_non_negative(input: &str) -> Decimal {
    coerce_decimal(input).max(Decimal::ZERO)
}

/// Coerces a discount percentage and clamps it into `0..=100`.
///
/// ## Example
/// ```rust
/// use invoice_core::coerce::coerce_discount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(coerce_discount("10"), Decimal::from(10));
/// assert_eq!(coerce_discount("150"), Decimal::ONE_HUNDRED);
/// assert_eq!(coerce_discount("-5"), Decimal::ZERO);
/// ```
pub fn coerce_discount(input: &str) -> Decimal {
    clamp_discount(coerce_decimal(input))
}

/// Clamps a discount percentage into `0..=100`.
#[inline]
pub fn clamp_discount(percent: Decimal) -> Decimal {
    percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// Parses the longest numeric prefix of `s`.
///
/// Returns `None` when there is no prefix or it does not fit a `Decimal`.
fn parse_prefix(s: &str) -> Option<Decimal> {
    let bytes = s.as_bytes();
    let mut i = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            i += 1;
            true
        }
        Some(b'+') => {
            i += 1;
            false
        }
        _ => false,
    };

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_part = &s[int_start..i];

    let mut frac_part = "";
    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        frac_part = &s[frac_start..j];
        i = j;
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut exponent: i64 = 0;
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        let exp_negative = match bytes.get(j) {
            Some(b'-') => {
                j += 1;
                true
            }
            Some(b'+') => {
                j += 1;
                false
            }
            _ => false,
        };
        let digits_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        // "5e" or "5e+" has no exponent; the mantissa alone counts
        if j > digits_start {
            // saturate absurd exponents; they fall outside MAX_EXPONENT anyway
            let magnitude = s[digits_start..j].parse::<i64>().unwrap_or(i64::MAX);
            exponent = if exp_negative { -magnitude } else { magnitude };
        }
    }

    let mut mantissa = String::with_capacity(int_part.len() + frac_part.len() + 3);
    if negative {
        mantissa.push('-');
    }
    mantissa.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        mantissa.push('.');
        mantissa.push_str(frac_part);
    }

    let value = Decimal::from_str(&mantissa).ok()?;
    apply_exponent(value, exponent).map(|d| d.normalize())
}

/// Scales `value` by `10^exponent`, `None` on overflow.
fn apply_exponent(value: Decimal, exponent: i64) -> Option<Decimal> {
    if exponent == 0 || value.is_zero() {
        return Some(value);
    }

    let steps = u32::try_from(exponent.unsigned_abs()).ok()?;
    if exponent > 0 {
        if steps > MAX_EXPONENT {
            return None;
        }
        (0..steps).try_fold(value, |acc, _| acc.checked_mul(Decimal::TEN))
    } else {
        if steps > MAX_EXPONENT {
            // smaller than the finest representable step
            return Some(Decimal::ZERO);
        }
        (0..steps).try_fold(value, |acc, _| acc.checked_div(Decimal::TEN))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
