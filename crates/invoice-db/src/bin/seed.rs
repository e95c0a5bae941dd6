//! # Seed Data Generator
//!
//! Populates the database with sample invoices for development.
//!
//! ## Usage
//! ```bash
//! # Generate 50 invoices (default)
//! cargo run -p invoice-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p invoice-db --bin seed -- --count 500
//!
//! # Specify database path
//! cargo run -p invoice-db --bin seed -- --db ./data/invoices.db
//! ```
//!
//! ## Generated Invoices
//! Each invoice has:
//! - One of a handful of companies and customers
//! - 1 - 6 line items from a small catalog
//! - Discounts of 0%, 5%, 10%, 12.5% or 20%
//! - Occasional fractional quantities (e.g. 2.5 kg)
//! - Footer computed with the default 9% CGST + 9% IGST
//!
//! Values are derived from the invoice index, so two runs produce the same
//! data (apart from ids and timestamps).

use std::env;

use invoice_core::{
    CompanyField, CoreResult, CustomerField, DraftCommand, InvoiceDraft, ItemField, TaxPolicy,
};
use invoice_db::{Database, DbConfig};
use tracing_subscriber::EnvFilter;

/// (name, address, contact)
const COMPANIES: &[(&str, &str, &str)] = &[
    ("Acme Traders", "12 MG Road, Bengaluru", "+91 80 4123 0000"),
    ("Shree Ganesh Hardware", "Shop 4, Lamington Rd, Mumbai", "+91 22 2387 1111"),
    ("Northwind Supplies", "88 Park Street, Kolkata", "+91 33 2229 4545"),
];

/// (name, address, contact, tax id)
const CUSTOMERS: &[(&str, &str, &str, &str)] = &[
    ("R. Sharma", "Flat 2B, Sector 15, Noida", "98100 12345", "ABCPS1234K"),
    ("Patel Enterprises", "GIDC Estate, Vapi", "97250 55555", "24AAACP1234F1Z5"),
    ("Meera Iyer", "T. Nagar, Chennai", "94440 98765", ""),
    ("Kumar & Sons", "Civil Lines, Jaipur", "94140 22222", "08AAKFK5678L1ZQ"),
];

/// (description, mrp)
const CATALOG: &[(&str, &str)] = &[
    ("Steel bolts M8 (box)", "240"),
    ("PVC pipe 1in (per m)", "85.50"),
    ("Wall paint 4L", "1450"),
    ("LED bulb 9W", "120"),
    ("Copper wire (per kg)", "780"),
    ("Cement 50kg bag", "395"),
    ("Hinge 4in", "42.75"),
    ("Drill bit set", "999"),
];

const DISCOUNTS: &[&str] = &["0", "5", "10", "12.5", "20"];

const QUANTITIES: &[&str] = &["1", "2", "3", "2.5", "10", "0.75"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,invoice=debug,sqlx=warn")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 50;
    let mut db_path = String::from("./invoices_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(50);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Invoice Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of invoices to generate (default: 50)");
                println!("  -d, --db <PATH>    Database file path (default: ./invoices_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Invoice Seed Data Generator");
    println!("===========================");
    println!("Database: {}", db_path);
    println!("Invoices: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.invoices().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} invoices", existing);
        println!("  Skipping seed to avoid mixing sample and real data.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating invoices...");

    let policy = TaxPolicy::default();
    let start = std::time::Instant::now();
    let mut generated = 0;

    for seed in 0..count {
        let draft = generate_draft(seed, &policy)?;

        if let Err(e) = db.invoices().create(&draft).await {
            eprintln!("Failed to insert invoice #{}: {}", seed, e);
            continue;
        }

        generated += 1;
        if generated % 25 == 0 {
            println!("  Generated {} invoices...", generated);
        }
    }

    println!();
    println!("✓ Generated {} invoices in {:?}", generated, start.elapsed());

    if let Some(latest) = db.invoices().list_all().await?.first() {
        println!(
            "  Latest: {} → {} ({} items, {})",
            latest.company_name, latest.customer_name, latest.item_count, latest.total_after_tax
        );
    }

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds one sample draft by replaying form edits.
fn generate_draft(seed: usize, policy: &TaxPolicy) -> CoreResult<InvoiceDraft> {
    let (company, company_address, company_contact) = COMPANIES[seed % COMPANIES.len()];
    let (customer, customer_address, customer_contact, tax_id) =
        CUSTOMERS[(seed * 7) % CUSTOMERS.len()];

    let mut commands = vec![
        DraftCommand::SetCompany {
            field: CompanyField::Name(company.to_string()),
        },
        DraftCommand::SetCompany {
            field: CompanyField::Address(company_address.to_string()),
        },
        DraftCommand::SetCompany {
            field: CompanyField::Contact(company_contact.to_string()),
        },
        DraftCommand::SetCustomer {
            field: CustomerField::Name(customer.to_string()),
        },
        DraftCommand::SetCustomer {
            field: CustomerField::Address(customer_address.to_string()),
        },
        DraftCommand::SetCustomer {
            field: CustomerField::Contact(customer_contact.to_string()),
        },
        DraftCommand::SetCustomer {
            field: CustomerField::TaxId(tax_id.to_string()),
        },
    ];

    let item_count = 1 + (seed * 5) % 6;
    for index in 0..item_count {
        let pick = seed * 3 + index * 11;
        let (description, mrp) = CATALOG[pick % CATALOG.len()];

        commands.push(DraftCommand::AddItem);
        commands.extend(
            [
                ItemField::Description(description.to_string()),
                ItemField::Mrp(mrp.to_string()),
                ItemField::Discount(DISCOUNTS[pick % DISCOUNTS.len()].to_string()),
                ItemField::Quantity(QUANTITIES[pick % QUANTITIES.len()].to_string()),
            ]
            .into_iter()
            .map(|field| DraftCommand::UpdateItem { index, field }),
        );
    }

    commands
        .into_iter()
        .try_fold(InvoiceDraft::new(), |draft, command| draft.apply(command, policy))
}
