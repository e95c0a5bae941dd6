//! # Pricing Engine
//!
//! Pure functions over an ordered list of line items and a tax policy.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Pricing Engine                                    │
//! │                                                                         │
//! │  LineItem { mrp, discount %, quantity }                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  recompute_item() ──► rate_after_discount = mrp × (1 − discount/100)    │
//! │                       final_rate          = rate_after_discount × qty   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  recompute_footer(items, policy)                                        │
//! │       ├── total_before_tax = Σ mrp × qty                                │
//! │       ├── pre_tax          = Σ final_rate                               │
//! │       ├── cgst             = pre_tax × cgst rate                        │
//! │       ├── igst             = pre_tax × igst rate                        │
//! │       └── total_after_tax  = pre_tax + cgst + igst                      │
//! │                                                                         │
//! │  Stateless: same input ⇒ same output. Every call returns new values.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use invoice_core::pricing;
//! use invoice_core::coerce::coerce_decimal;
//! use invoice_core::money::Money;
//! use invoice_core::types::{LineItem, TaxPolicy};
//!
//! let mut item = LineItem::blank("1");
//! item.mrp = Money::new(coerce_decimal("100"));
//! item.discount_percent = coerce_decimal("10");
//! item.quantity = coerce_decimal("2");
//!
//! let item = pricing::recompute_item(&item);
//! assert_eq!(item.final_rate.to_string(), "180.00");
//!
//! let footer = pricing::recompute_footer(&[item.clone(), item], &TaxPolicy::default());
//! assert_eq!(footer.total_after_tax.to_string(), "424.80");
//! ```

use rust_decimal::Decimal;

use crate::coerce::clamp_discount;
use crate::money::Money;
use crate::types::{FooterTotals, LineItem, TaxPolicy};

/// Recomputes the derived fields of one item.
///
/// Inputs are normalized first: `mrp` and `quantity` are floored at zero and
/// the discount is clamped into `0..=100`. The returned item always satisfies
/// `rate_after_discount = mrp × (1 − discount_percent / 100)` with its own
/// stored values, whatever the caller sent.
pub fn recompute_item(item: &LineItem) -> LineItem {
    let mrp = item.mrp.max(Money::ZERO);
    let quantity = item.quantity.max(Decimal::ZERO);
    let discount_percent = clamp_discount(item.discount_percent);
    let rate_after_discount = mrp.apply_percentage_discount(discount_percent);
    let final_rate = rate_after_discount.multiply_quantity(quantity);

    LineItem {
        mrp,
        quantity,
        discount_percent,
        rate_after_discount,
        final_rate,
        ..item.clone()
    }
}

/// Computes the footer totals of `items` under `policy`.
///
/// Uses each item's stored `final_rate`; callers that changed an item pass
/// it through [`recompute_item`] first (or use [`recompute`]).
/// An empty list yields [`FooterTotals::zero`].
pub fn recompute_footer(items: &[LineItem], policy: &TaxPolicy) -> FooterTotals {
    let total_before_tax: Money = items.iter().map(LineItem::gross).sum();
    let pre_tax: Money = items.iter().map(|item| item.final_rate).sum();

    let cgst = pre_tax.calculate_tax(policy.cgst);
    let igst = pre_tax.calculate_tax(policy.igst);

    FooterTotals {
        total_before_tax,
        cgst,
        igst,
        total_after_tax: pre_tax + cgst + igst,
    }
}

/// Recomputes every item, then the footer.
pub fn recompute(items: &[LineItem], policy: &TaxPolicy) -> (Vec<LineItem>, FooterTotals) {
    let items: Vec<LineItem> = items.iter().map(recompute_item).collect();
    let footer = recompute_footer(&items, policy);
    (items, footer)
}

/// Appends a blank item numbered `len + 1`.
///
/// Serials are positional at creation time only; after a removal the next
/// serial can repeat an existing one.
pub fn add_item(items: &[LineItem]) -> Vec<LineItem> {
    let mut next = items.to_vec();
    next.push(LineItem::blank((items.len() + 1).to_string()));
    next
}

/// Removes the item at `index` without renumbering the rest.
///
/// An out-of-range index returns the list unchanged.
pub fn remove_item(items: &[LineItem], index: usize) -> Vec<LineItem> {
    items
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, item)| item.clone())
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaxRate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn money(s: &str) -> Money {
        Money::new(dec(s))
    }

    fn item(serial: &str, mrp: &str, discount: &str, qty: &str) -> LineItem {
        let mut item = LineItem::blank(serial);
        item.mrp = money(mrp);
        item.discount_percent = dec(discount);
        item.quantity = dec(qty);
        recompute_item(&item)
    }

    #[test]
    fn test_reference_item() {
        let item = item("1", "100", "10", "2");
        assert_eq!(item.rate_after_discount, money("90"));
        assert_eq!(item.final_rate, money("180"));
    }

    #[test]
    fn test_reference_footer() {
        let items = vec![item("1", "100", "10", "2"), item("2", "100", "10", "2")];
        let footer = recompute_footer(&items, &TaxPolicy::default());

        assert_eq!(footer.total_before_tax, money("400"));
        assert_eq!(footer.cgst, money("32.4"));
        assert_eq!(footer.igst, money("32.4"));
        assert_eq!(footer.total_after_tax, money("424.8"));
    }

    #[test]
    fn test_item_invariants_hold() {
        let cases = [
            ("0", "0", "0"),
            ("100", "0", "1"),
            ("99.99", "12.5", "3"),
            ("250", "100", "4"),
            ("19.95", "33.333", "0.75"),
            ("1000000", "5", "1000"),
        ];

        for (mrp, discount, qty) in cases {
            let item = item("1", mrp, discount, qty);
            let expected_rate = dec(mrp) * (Decimal::ONE - dec(discount) / Decimal::ONE_HUNDRED);
            assert_eq!(item.rate_after_discount.amount(), expected_rate, "rate for {mrp}");
            assert_eq!(
                item.final_rate.amount(),
                expected_rate * dec(qty),
                "final for {mrp}"
            );
        }
    }

    #[test]
    fn test_discount_outside_range_is_clamped() {
        let over = item("1", "100", "150", "1");
        assert_eq!(over.discount_percent, dec("100"));
        assert!(over.final_rate.is_zero());

        let under = item("1", "100", "-20", "1");
        assert_eq!(under.discount_percent, Decimal::ZERO);
        assert_eq!(under.final_rate, money("100"));
    }

    #[test]
    fn test_negative_mrp_and_quantity_are_floored() {
        let negative_mrp = item("1", "-100", "0", "2");
        assert!(negative_mrp.mrp.is_zero());
        assert!(negative_mrp.final_rate.is_zero());

        let negative_qty = item("2", "100", "10", "-3");
        assert_eq!(negative_qty.quantity, Decimal::ZERO);
        assert!(negative_qty.final_rate.is_zero());

        let footer = recompute_footer(&[negative_mrp, negative_qty], &TaxPolicy::default());
        assert_eq!(footer, FooterTotals::zero());
    }

    #[test]
    fn test_fractional_quantity() {
        let item = item("1", "40", "25", "1.5");
        assert_eq!(item.final_rate, money("45"));
    }

    #[test]
    fn test_derived_fields_are_overwritten() {
        let mut stale = item("1", "100", "10", "2");
        stale.rate_after_discount = money("1");
        stale.final_rate = money("999");

        let fresh = recompute_item(&stale);
        assert_eq!(fresh.rate_after_discount, money("90"));
        assert_eq!(fresh.final_rate, money("180"));
    }

    #[test]
    fn test_footer_totals_after_tax_is_pre_tax_times_1_18() {
        let items = vec![
            item("1", "12.40", "5", "3"),
            item("2", "7", "0", "11"),
            item("3", "1500", "18", "0.5"),
        ];
        let footer = recompute_footer(&items, &TaxPolicy::default());

        let pre_tax: Money = items.iter().map(|i| i.final_rate).sum();
        assert_eq!(
            footer.total_after_tax.amount(),
            pre_tax.amount() * dec("1.18")
        );
        let gross: Decimal = items.iter().map(|i| i.mrp.amount() * i.quantity).sum();
        assert_eq!(footer.total_before_tax.amount(), gross);
    }

    #[test]
    fn test_empty_list_footer_is_zero() {
        assert_eq!(
            recompute_footer(&[], &TaxPolicy::default()),
            FooterTotals::zero()
        );
    }

    #[test]
    fn test_custom_tax_policy() {
        let items = vec![item("1", "100", "0", "1")];
        let policy = TaxPolicy::new(TaxRate::from_bps(250), TaxRate::zero());
        let footer = recompute_footer(&items, &policy);

        assert_eq!(footer.cgst, money("2.5"));
        assert!(footer.igst.is_zero());
        assert_eq!(footer.total_after_tax, money("102.5"));
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let items = vec![item("1", "99.99", "7.5", "3"), item("2", "0.35", "0", "120")];
        let policy = TaxPolicy::default();

        let (once, footer_once) = recompute(&items, &policy);
        let (twice, footer_twice) = recompute(&once, &policy);

        assert_eq!(once, items);
        assert_eq!(once, twice);
        assert_eq!(footer_once, footer_twice);
    }

    #[test]
    fn test_add_item_numbers_by_length() {
        let items = add_item(&[]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].serial, "1");
        assert_eq!(items[0], LineItem::blank("1"));

        let items = add_item(&items);
        assert_eq!(items[1].serial, "2");
    }

    #[test]
    fn test_remove_item_keeps_serials() {
        let items = vec![
            item("1", "10", "0", "1"),
            item("2", "20", "0", "1"),
            item("3", "30", "0", "1"),
        ];

        let remaining = remove_item(&items, 1);
        let serials: Vec<&str> = remaining.iter().map(|i| i.serial.as_str()).collect();
        assert_eq!(serials, ["1", "3"]);

        let footer = recompute_footer(&remaining, &TaxPolicy::default());
        assert_eq!(footer.total_before_tax, money("40"));
        assert_eq!(footer.total_after_tax, money("47.2"));

        // the next added item repeats serial "3"
        let grown = add_item(&remaining);
        assert_eq!(grown[2].serial, "3");
    }

    #[test]
    fn test_remove_item_out_of_range_is_noop() {
        let items = vec![item("1", "10", "0", "1")];
        assert_eq!(remove_item(&items, 5), items);
        assert!(remove_item(&[], 0).is_empty());
    }

    #[test]
    fn test_input_is_not_mutated() {
        let items = vec![item("1", "10", "0", "1")];
        let before = items.clone();
        let _ = add_item(&items);
        let _ = remove_item(&items, 0);
        let _ = recompute(&items, &TaxPolicy::default());
        assert_eq!(items, before);
    }
}
