//! Store connection management.
//!
//! This module provides the main store type with proper initialization and
//! PRAGMA settings for concurrent access from multiple connections and
//! processes.

use rusqlite::{Connection, OpenFlags, Transaction, TransactionBehavior};

use crate::error::{Error, Result};

use super::config::StoreConfig;

/// A store connection wrapper with configuration.
///
/// Each thread or process that books reservations opens its own `Store`
/// against the shared database file; `SQLite`'s write lock arbitrates
/// between them. WAL mode and a busy timeout are configured so lock waits
/// are bounded rather than failing immediately.
///
/// # Examples
///
/// ```no_run
/// use slotbook::store::{Store, StoreConfig};
///
/// let config = StoreConfig::new("/tmp/slotbook.db");
/// let store = Store::open(config).unwrap();
/// ```
#[derive(Debug)]
pub struct Store {
    pub(super) conn: Connection,
    #[allow(dead_code)]
    config: StoreConfig,
}

impl Store {
    /// Opens a store connection with the given configuration.
    ///
    /// This function will:
    /// - Create the parent directory if `auto_create` is enabled
    /// - Open the database with appropriate flags
    /// - Set WAL mode for concurrent access
    /// - Configure the busy timeout
    /// - Initialize or verify the schema
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The database file cannot be opened
    /// - The parent directory cannot be created
    /// - PRAGMA settings cannot be applied
    /// - Schema initialization or verification fails
    pub fn open(config: StoreConfig) -> Result<Self> {
        if !config.auto_create && !config.path.exists() {
            return Err(Error::DataDirectoryNotFound {
                path: config.path.clone(),
            });
        }

        // Ensure parent directory exists if auto-creating
        if config.auto_create && !config.path.exists() {
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        let conn = Connection::open_with_flags(&config.path, flags)?;

        // Note: PRAGMA journal_mode returns a result row, so query_row it
        let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        conn.execute_batch("PRAGMA synchronous = NORMAL")?;
        conn.execute_batch(&format!(
            "PRAGMA busy_timeout = {}",
            config.busy_timeout.as_millis()
        ))?;

        super::migrations::check_schema_compatibility(&conn)?;

        Ok(Self { conn, config })
    }

    /// Begins the transaction the admission path runs inside.
    ///
    /// `IMMEDIATE` behavior takes `SQLite`'s write lock up front, so the
    /// check-then-insert sequence inside the transaction is atomic with
    /// respect to every other connection and process on the same file: a
    /// concurrent booking attempt blocks here until this transaction commits
    /// or rolls back. `SQLite`'s lock covers the whole database rather than
    /// a single row, which is coarser than strictly required but satisfies
    /// the blocking contract.
    ///
    /// The wait is bounded by the configured busy timeout; exceeding it
    /// surfaces as the retryable [`Error::TemporarilyUnavailable`] outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started.
    pub fn begin_immediate(&mut self) -> Result<Transaction<'_>> {
        self.conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| Error::from_storage(e, "begin booking transaction"))
    }

    /// Returns a reference to the underlying `SQLite` connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns a mutable reference to the underlying `SQLite` connection.
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Verifies database integrity using PRAGMA `integrity_check`.
    ///
    /// # Errors
    ///
    /// Returns an error if the integrity check fails or detects corruption.
    pub fn verify_integrity(&mut self) -> Result<()> {
        let result: String = self
            .conn
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;

        if result == "ok" {
            Ok(())
        } else {
            Err(Error::DatabaseCorruption {
                details: format!("integrity check failed: {result}"),
            })
        }
    }
}
