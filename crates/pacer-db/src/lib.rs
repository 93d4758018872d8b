//! # pacer-db
//!
//! Key-value persistence and the task store for Pacer.
//!
//! All state lives in named logical slots (`tasks`, `priority_cache`), each
//! holding one JSON document. [`storage::SlotStorage`] abstracts the slots so
//! callers can inject the libSQL-backed [`PacerDb`] in production and
//! [`storage::MemoryStorage`] in tests.
//!
//! Uses the `libsql` crate (C `SQLite` fork) in local-only mode.

pub mod error;
mod migrations;
pub mod repos;
pub mod stats;
pub mod storage;
pub mod updates;

use error::DatabaseError;
use libsql::Builder;

pub use repos::task::{TaskFilter, TaskStore};
pub use storage::{MemoryStorage, SLOT_PRIORITY_CACHE, SLOT_TASKS, SlotStorage};

/// Central database handle for all Pacer state.
///
/// Wraps a libSQL database and connection. Implements [`SlotStorage`] over
/// the `slots` table.
pub struct PacerDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl PacerDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let pacer_db = Self { db, conn };
        pacer_db.run_migrations().await?;
        tracing::debug!(path, "opened pacer database");
        Ok(pacer_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
