//! Database error types for pacer-db.

use pacer_core::errors::CoreError;
use thiserror::Error;

/// Errors from storage and task store operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in a slot).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A domain rule was violated (missing task, bad transition, bad data).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A slot value could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
