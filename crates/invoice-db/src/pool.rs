//! # Store Connection
//!
//! Opens the invoice database, applies the embedded schema and hands out
//! repositories.
//!
//! ## Access Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Invoice Store Traffic                             │
//! │                                                                         │
//! │  POST /api/invoices       ──► one write transaction                     │
//! │                               (invoice row + its item rows)             │
//! │  GET  /api/invoices       ──► read: one summary query                   │
//! │  GET  /api/invoices/{id}  ──► read: invoice row, then item rows         │
//! │                                                                         │
//! │  Invoices are written once and never updated, so the store is read     │
//! │  mostly. WAL lets list and lookup reads proceed while a submit is       │
//! │  committing; busy_timeout makes a second submit wait its turn.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Schema
//! SQL files under `migrations/sqlite/` are embedded at compile time and
//! applied by [`Database::new`]. Add a new numbered file for every schema
//! change; applied files are never edited.

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::invoice::InvoiceRepository;

/// Embedded schema, `migrations/sqlite/NNN_*.sql`.
static MIGRATOR: Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Connections for a file-backed store: a few concurrent readers, writes
/// are serialized by SQLite anyway.
const FILE_POOL_SIZE: u32 = 4;

/// How long a handler waits for a free connection.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// How long a writer waits on a locked database before `SQLITE_BUSY`.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const IN_MEMORY: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Where the invoice store lives.
///
/// ## Example
/// ```rust
/// use invoice_db::DbConfig;
///
/// assert!(!DbConfig::new("./invoices.db").is_in_memory());
/// assert!(DbConfig::in_memory().is_in_memory());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// Path to the SQLite file, created on first use.
    pub database_path: PathBuf,
}

impl DbConfig {
    /// A file-backed store at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
        }
    }

    /// A private store that disappears with the process. Used by tests.
    pub fn in_memory() -> Self {
        DbConfig::new(IN_MEMORY)
    }

    /// Whether this config points at a private in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY
    }

    /// Every connection to an in-memory database is its own database, so
    /// that mode gets exactly one.
    fn pool_size(&self) -> u32 {
        if self.is_in_memory() {
            1
        } else {
            FILE_POOL_SIZE
        }
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = if self.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&self.database_path)
                .create_if_missing(true)
        };

        Ok(options
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            // item rows cascade with their invoice
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT))
    }
}

// =============================================================================
// Database
// =============================================================================

/// Handle to the invoice store.
///
/// Cheap to clone (the pool is reference counted), so the HTTP layer keeps
/// one in its shared state.
///
/// ## Usage in Handlers
/// ```rust,ignore
/// async fn get_invoice(
///     State(state): State<SharedState>,
///     Path(id): Path<String>,
/// ) -> Result<Json<Invoice>, ApiError> {
///     let invoice = state.db().invoices().get_by_id(&id).await?;
///     ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the store and applies any pending schema files.
    ///
    /// ## Errors
    /// * `ConnectionFailed` - the file cannot be opened or created
    /// * `MigrationFailed` - a schema file did not apply
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening invoice store"
        );

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size())
            .min_connections(1)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            // keep connections for the life of the process; an in-memory
            // store is dropped with its last connection
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(config.connect_options()?)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        debug!(connections = config.pool_size(), "Pool created");

        MIGRATOR.run(&pool).await?;
        info!("Schema up to date");

        Ok(Database { pool })
    }

    /// Returns the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the invoice repository.
    pub fn invoices(&self) -> InvoiceRepository {
        InvoiceRepository::new(self.pool.clone())
    }

    /// Number of schema files recorded as applied.
    pub async fn applied_migrations(&self) -> DbResult<usize> {
        let applied: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
                .fetch_one(&self.pool)
                .await?;

        usize::try_from(applied).map_err(|e| DbError::Internal(e.to_string()))
    }

    /// Closes the pool. Repository calls fail afterwards.
    pub async fn close(&self) {
        info!("Closing invoice store");
        self.pool.close().await;
    }

    /// `true` when the store answers a trivial query.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
