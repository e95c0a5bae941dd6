//! # Invoice Drafts
//!
//! An [`InvoiceDraft`] is the invoice while it is still being typed in. It is
//! an immutable value: every edit is a [`DraftCommand`] that produces a new
//! draft with items and footer recomputed. The frontend only keeps the latest
//! draft and re-renders it.
//!
//! ## Command Dispatch
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Frontend edit                    DraftCommand (JSON)                   │
//! │  ─────────────                    ───────────────────                   │
//! │  Company name field ────────────► {kind: set_company,                   │
//! │                                    field: {kind: name, value: "Acme"}}  │
//! │  "Add Item" button ─────────────► {kind: add_item}                      │
//! │  Remove row 2 ──────────────────► {kind: remove_item, index: 1}         │
//! │  MRP field of row 1 ────────────► {kind: update_item, index: 0,         │
//! │                                    field: {kind: mrp, value: "100"}}    │
//! │                                                                         │
//! │            InvoiceDraft::apply(command, policy)                         │
//! │                          │                                              │
//! │                          ▼                                              │
//! │            new InvoiceDraft (items + footer recomputed)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Numeric values arrive as the raw text of the input field and are coerced
//! (see [`crate::coerce`]); they never cause an error. MRP and quantity
//! floor at zero, discount is clamped into `0..=100`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::coerce::{coerce_discount, coerce_non_negative};
use crate::error::CoreResult;
use crate::money::Money;
use crate::pricing;
use crate::types::{Company, Customer, FooterTotals, LineItem, TaxPolicy};
use crate::validation::validate_item_index;

// =============================================================================
// Field Commands
// =============================================================================

/// An edit to one field of a line item.
///
/// The derived fields and the serial are not editable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
#[ts(export)]
pub enum ItemField {
    Description(String),
    Mrp(String),
    Discount(String),
    Quantity(String),
}

/// An edit to one field of the company block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
#[ts(export)]
pub enum CompanyField {
    Name(String),
    Address(String),
    Contact(String),
}

/// An edit to one field of the customer block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
#[ts(export)]
pub enum CustomerField {
    Name(String),
    Address(String),
    Contact(String),
    TaxId(String),
}

/// Every edit the invoice form can make.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum DraftCommand {
    SetCompany { field: CompanyField },
    SetCustomer { field: CustomerField },
    AddItem,
    RemoveItem { index: usize },
    UpdateItem { index: usize, field: ItemField },
}

// =============================================================================
// Draft
// =============================================================================

/// An invoice that has not been submitted yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceDraft {
    pub company: Company,
    pub customer: Customer,
    pub items: Vec<LineItem>,
    pub footer: FooterTotals,
}

impl InvoiceDraft {
    /// An empty draft: no parties, no items, zero footer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one command and returns the resulting draft.
    ///
    /// ## Errors
    /// `CoreError::ItemIndexOutOfRange` when `update_item` / `remove_item`
    /// point past the end of the item list. Field values never error.
    pub fn apply(&self, command: DraftCommand, policy: &TaxPolicy) -> CoreResult<InvoiceDraft> {
        let mut next = self.clone();

        match command {
            DraftCommand::SetCompany { field } => apply_company_field(&mut next.company, field),
            DraftCommand::SetCustomer { field } => apply_customer_field(&mut next.customer, field),
            DraftCommand::AddItem => next.items = pricing::add_item(&self.items),
            DraftCommand::RemoveItem { index } => {
                validate_item_index(index, self.items.len())?;
                next.items = pricing::remove_item(&self.items, index);
            }
            DraftCommand::UpdateItem { index, field } => {
                validate_item_index(index, self.items.len())?;
                apply_item_field(&mut next.items[index], field);
            }
        }

        Ok(next.recomputed(policy))
    }

    /// Returns the draft with every item and the footer recomputed.
    ///
    /// Used on anything that did not come out of [`InvoiceDraft::apply`],
    /// e.g. a draft submitted by a client.
    pub fn recomputed(&self, policy: &TaxPolicy) -> InvoiceDraft {
        let (items, footer) = pricing::recompute(&self.items, policy);
        InvoiceDraft {
            company: self.company.clone(),
            customer: self.customer.clone(),
            items,
            footer,
        }
    }

    /// Whether nothing has been entered yet.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
            && self.company == Company::default()
            && self.customer == Customer::default()
    }
}

fn apply_company_field(company: &mut Company, field: CompanyField) {
    match field {
        CompanyField::Name(value) => company.name = value,
        CompanyField::Address(value) => company.address = value,
        CompanyField::Contact(value) => company.contact = value,
    }
}

fn apply_customer_field(customer: &mut Customer, field: CustomerField) {
    match field {
        CustomerField::Name(value) => customer.name = value,
        CustomerField::Address(value) => customer.address = value,
        CustomerField::Contact(value) => customer.contact = value,
        CustomerField::TaxId(value) => customer.tax_id = value,
    }
}

fn apply_item_field(item: &mut LineItem, field: ItemField) {
    match field {
        ItemField::Description(value) => item.description = value,
        ItemField::Mrp(text) => item.mrp = Money::new(coerce_non_negative(&text)),
        ItemField::Discount(text) => item.discount_percent = coerce_discount(&text),
        ItemField::Quantity(text) => item.quantity = coerce_non_negative(&text),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
