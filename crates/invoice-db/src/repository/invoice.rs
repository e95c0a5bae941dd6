//! # Invoice Repository
//!
//! Database operations for submitted invoices.
//!
//! ## Invoice Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Invoice Lifecycle                                 │
//! │                                                                         │
//! │  1. DRAFT (not stored)                                                 │
//! │     └── edited through DraftCommands in invoice-core                    │
//! │                                                                         │
//! │  2. CREATE                                                             │
//! │     └── create(&draft) → Invoice { id: UUID v4, created_at: now }       │
//! │         ├── INSERT invoices           ┐                                 │
//! │         └── INSERT invoice_items × N  ┘ one transaction                 │
//! │                                                                         │
//! │  3. READ (forever after, never updated)                                │
//! │     ├── get_by_id(id) → Option<Invoice>                                 │
//! │     └── list_all()    → Vec<InvoiceSummary> (newest first)              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Decimal Columns
//! Prices, percentages and quantities go in as `Decimal::to_string()` and
//! come back through `Decimal::from_str`. Nothing numeric is stored as REAL.

use chrono::{DateTime, SubsecRound, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use invoice_core::{
    Company, Customer, FooterTotals, Invoice, InvoiceDraft, InvoiceSummary, LineItem, Money,
};

// =============================================================================
// Row Types
// =============================================================================

#[derive(Debug, FromRow)]
struct InvoiceRow {
    id: String,
    company_name: String,
    company_address: String,
    company_contact: String,
    customer_name: String,
    customer_address: String,
    customer_contact: String,
    customer_tax_id: String,
    total_before_tax: String,
    cgst: String,
    igst: String,
    total_after_tax: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct ItemRow {
    serial: String,
    description: String,
    mrp: String,
    discount_percent: String,
    rate_after_discount: String,
    quantity: String,
    final_rate: String,
}

#[derive(Debug, FromRow)]
struct SummaryRow {
    id: String,
    company_name: String,
    customer_name: String,
    item_count: i64,
    total_after_tax: String,
    created_at: DateTime<Utc>,
}

/// Parses a stored decimal, naming the column on failure.
fn parse_decimal(column: &str, value: &str) -> DbResult<Decimal> {
    Decimal::from_str(value).map_err(|_| DbError::corrupt(column, value))
}

fn parse_money(column: &str, value: &str) -> DbResult<Money> {
    parse_decimal(column, value).map(Money::new)
}

impl ItemRow {
    fn into_line_item(self) -> DbResult<LineItem> {
        Ok(LineItem {
            mrp: parse_money("invoice_items.mrp", &self.mrp)?,
            discount_percent: parse_decimal(
                "invoice_items.discount_percent",
                &self.discount_percent,
            )?,
            rate_after_discount: parse_money(
                "invoice_items.rate_after_discount",
                &self.rate_after_discount,
            )?,
            quantity: parse_decimal("invoice_items.quantity", &self.quantity)?,
            final_rate: parse_money("invoice_items.final_rate", &self.final_rate)?,
            serial: self.serial,
            description: self.description,
        })
    }
}

impl InvoiceRow {
    fn into_invoice(self, items: Vec<LineItem>) -> DbResult<Invoice> {
        let footer = FooterTotals {
            total_before_tax: parse_money("invoices.total_before_tax", &self.total_before_tax)?,
            cgst: parse_money("invoices.cgst", &self.cgst)?,
            igst: parse_money("invoices.igst", &self.igst)?,
            total_after_tax: parse_money("invoices.total_after_tax", &self.total_after_tax)?,
        };

        Ok(Invoice {
            id: self.id,
            company: Company {
                name: self.company_name,
                address: self.company_address,
                contact: self.company_contact,
            },
            customer: Customer {
                name: self.customer_name,
                address: self.customer_address,
                contact: self.customer_contact,
                tax_id: self.customer_tax_id,
            },
            items,
            footer,
            created_at: self.created_at,
        })
    }
}

impl SummaryRow {
    fn into_summary(self) -> DbResult<InvoiceSummary> {
        Ok(InvoiceSummary {
            total_after_tax: parse_money("invoices.total_after_tax", &self.total_after_tax)?,
            id: self.id,
            company_name: self.company_name,
            customer_name: self.customer_name,
            item_count: self.item_count,
            created_at: self.created_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for invoice database operations.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    /// Creates a new InvoiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InvoiceRepository { pool }
    }

    /// Stores a draft as a new invoice.
    ///
    /// The draft is stored exactly as given; callers recompute it first.
    /// The invoice row and all item rows are written in one transaction, so
    /// a failure leaves nothing behind.
    ///
    /// ## Returns
    /// The stored invoice with its generated id and creation time.
    pub async fn create(&self, draft: &InvoiceDraft) -> DbResult<Invoice> {
        let invoice = Invoice {
            id: Uuid::new_v4().to_string(),
            company: draft.company.clone(),
            customer: draft.customer.clone(),
            items: draft.items.clone(),
            footer: draft.footer,
            // millisecond precision survives the TEXT round trip unchanged
            created_at: Utc::now().trunc_subsecs(3),
        };

        debug!(id = %invoice.id, items = invoice.items.len(), "Creating invoice");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO invoices (
                id,
                company_name, company_address, company_contact,
                customer_name, customer_address, customer_contact, customer_tax_id,
                total_before_tax, cgst, igst, total_after_tax,
                created_at
            ) VALUES (
                ?1,
                ?2, ?3, ?4,
                ?5, ?6, ?7, ?8,
                ?9, ?10, ?11, ?12,
                ?13
            )
            "#,
        )
        .bind(&invoice.id)
        .bind(&invoice.company.name)
        .bind(&invoice.company.address)
        .bind(&invoice.company.contact)
        .bind(&invoice.customer.name)
        .bind(&invoice.customer.address)
        .bind(&invoice.customer.contact)
        .bind(&invoice.customer.tax_id)
        .bind(invoice.footer.total_before_tax.amount().to_string())
        .bind(invoice.footer.cgst.amount().to_string())
        .bind(invoice.footer.igst.amount().to_string())
        .bind(invoice.footer.total_after_tax.amount().to_string())
        .bind(invoice.created_at)
        .execute(&mut *tx)
        .await?;

        for (sort_order, item) in invoice.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO invoice_items (
                    invoice_id, sort_order,
                    serial, description,
                    mrp, discount_percent, rate_after_discount,
                    quantity, final_rate
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
            )
            .bind(&invoice.id)
            .bind(sort_order as i64)
            .bind(&item.serial)
            .bind(&item.description)
            .bind(item.mrp.amount().to_string())
            .bind(item.discount_percent.to_string())
            .bind(item.rate_after_discount.amount().to_string())
            .bind(item.quantity.to_string())
            .bind(item.final_rate.amount().to_string())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(id = %invoice.id, total = %invoice.footer.total_after_tax, "Invoice stored");
        Ok(invoice)
    }

    /// Gets an invoice with its items (in entry order) by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Invoice>> {
        debug!(id = %id, "Fetching invoice");

        let row: Option<InvoiceRow> = sqlx::query_as(
            r#"
            SELECT
                id,
                company_name, company_address, company_contact,
                customer_name, customer_address, customer_contact, customer_tax_id,
                total_before_tax, cgst, igst, total_after_tax,
                created_at
            FROM invoices
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = self.get_items(id).await?;
        row.into_invoice(items).map(Some)
    }

    /// Lists every stored invoice, newest first.
    pub async fn list_all(&self) -> DbResult<Vec<InvoiceSummary>> {
        let rows: Vec<SummaryRow> = sqlx::query_as(
            r#"
            SELECT
                i.id,
                i.company_name,
                i.customer_name,
                (SELECT COUNT(*) FROM invoice_items it WHERE it.invoice_id = i.id) AS item_count,
                i.total_after_tax,
                i.created_at
            FROM invoices i
            ORDER BY i.created_at DESC, i.rowid DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Listed invoices");

        rows.into_iter().map(SummaryRow::into_summary).collect()
    }

    /// Counts stored invoices.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn get_items(&self, invoice_id: &str) -> DbResult<Vec<LineItem>> {
        let rows: Vec<ItemRow> = sqlx::query_as(
            r#"
            SELECT
                serial, description,
                mrp, discount_percent, rate_after_discount,
                quantity, final_rate
            FROM invoice_items
            WHERE invoice_id = ?1
            ORDER BY sort_order
            "#,
        )
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ItemRow::into_line_item).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use invoice_core::{CompanyField, CustomerField, DraftCommand, ItemField, TaxPolicy};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn sample_draft(company: &str, lines: &[(&str, &str, &str)]) -> InvoiceDraft {
        let policy = TaxPolicy::default();
        let mut draft = InvoiceDraft::new()
            .apply(
                DraftCommand::SetCompany {
                    field: CompanyField::Name(company.to_string()),
                },
                &policy,
            )
            .unwrap()
            .apply(
                DraftCommand::SetCustomer {
                    field: CustomerField::TaxId("27AAPFU0939F1ZV".to_string()),
                },
                &policy,
            )
            .unwrap();

        for (index, (mrp, discount, qty)) in lines.iter().enumerate() {
            let commands = [
                DraftCommand::AddItem,
                DraftCommand::UpdateItem {
                    index,
                    field: ItemField::Description(format!("Item {}", index + 1)),
                },
                DraftCommand::UpdateItem {
                    index,
                    field: ItemField::Mrp(mrp.to_string()),
                },
                DraftCommand::UpdateItem {
                    index,
                    field: ItemField::Discount(discount.to_string()),
                },
                DraftCommand::UpdateItem {
                    index,
                    field: ItemField::Quantity(qty.to_string()),
                },
            ];
            for command in commands {
                draft = draft.apply(command, &policy).unwrap();
            }
        }

        draft
    }

    #[tokio::test]
    async fn test_create_and_get_round_trip() {
        let db = test_db().await;
        let draft = sample_draft("Acme Traders", &[("100", "10", "2"), ("19.99", "12.5", "0.75")]);

        let created = db.invoices().create(&draft).await.unwrap();
        assert!(Uuid::parse_str(&created.id).is_ok());
        assert_eq!(created.items, draft.items);
        assert_eq!(created.footer, draft.footer);

        let fetched = db.invoices().get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.customer.tax_id, "27AAPFU0939F1ZV");
    }

    #[tokio::test]
    async fn test_items_keep_entry_order_and_serials() {
        let db = test_db().await;
        let policy = TaxPolicy::default();
        let draft = sample_draft("Acme", &[("10", "0", "1"), ("20", "0", "1"), ("30", "0", "1")])
            .apply(DraftCommand::RemoveItem { index: 0 }, &policy)
            .unwrap();

        let created = db.invoices().create(&draft).await.unwrap();
        let fetched = db.invoices().get_by_id(&created.id).await.unwrap().unwrap();

        let serials: Vec<&str> = fetched.items.iter().map(|i| i.serial.as_str()).collect();
        assert_eq!(serials, ["2", "3"]);
        assert_eq!(fetched.items[0].description, "Item 2");
    }

    #[tokio::test]
    async fn test_empty_invoice_can_be_stored() {
        let db = test_db().await;
        let created = db.invoices().create(&InvoiceDraft::new()).await.unwrap();

        let fetched = db.invoices().get_by_id(&created.id).await.unwrap().unwrap();
        assert!(fetched.items.is_empty());
        assert_eq!(fetched.footer, FooterTotals::zero());
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let db = test_db().await;
        let missing = db
            .invoices()
            .get_by_id("550e8400-e29b-41d4-a716-446655440000")
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_list_all_newest_first() {
        let db = test_db().await;
        let repo = db.invoices();

        let first = repo.create(&sample_draft("First", &[("5", "0", "1")])).await.unwrap();
        let second = repo
            .create(&sample_draft("Second", &[("100", "10", "2"), ("100", "10", "2")]))
            .await
            .unwrap();

        let list = repo.list_all().await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, second.id);
        assert_eq!(list[1].id, first.id);

        assert_eq!(list[0].company_name, "Second");
        assert_eq!(list[0].item_count, 2);
        assert_eq!(list[0].total_after_tax.to_string(), "424.80");
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_corrupt_decimal_is_reported() {
        let db = test_db().await;
        let created = db
            .invoices()
            .create(&sample_draft("Acme", &[("1", "0", "1")]))
            .await
            .unwrap();

        sqlx::query("UPDATE invoices SET cgst = 'not-a-number' WHERE id = ?1")
            .bind(&created.id)
            .execute(db.pool())
            .await
            .unwrap();

        let err = db.invoices().get_by_id(&created.id).await.unwrap_err();
        assert!(matches!(err, DbError::CorruptValue { ref column, .. } if column == "invoices.cgst"));
    }
}
