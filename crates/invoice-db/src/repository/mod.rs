//! # Repository Module
//!
//! Database repository implementations for the invoice store.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.invoices().get_by_id(&id)                                  │
//! │       ▼                                                                 │
//! │  InvoiceRepository                                                     │
//! │  ├── create(&self, draft)                                              │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── list_all(&self)                                                   │
//! │  └── count(&self)                                                      │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`invoice::InvoiceRepository`] - Invoice create / lookup / listing

pub mod invoice;
