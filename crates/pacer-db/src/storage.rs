//! Named-slot storage abstraction.
//!
//! A slot is a key holding one JSON document. Owners (`TaskStore`,
//! `PriorityCache`) receive a `SlotStorage` at construction; nothing in Pacer
//! reaches for global state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::PacerDb;
use crate::error::DatabaseError;

/// Ordered array of task records.
pub const SLOT_TASKS: &str = "tasks";

/// The last successful ranking, or absent.
pub const SLOT_PRIORITY_CACHE: &str = "priority_cache";

/// Get/set/delete on named logical slots.
///
/// `set_slot` replaces the whole value in a single write.
#[async_trait]
pub trait SlotStorage: Send + Sync {
    async fn get_slot(&self, key: &str) -> Result<Option<String>, DatabaseError>;
    async fn set_slot(&self, key: &str, value: &str) -> Result<(), DatabaseError>;
    async fn delete_slot(&self, key: &str) -> Result<(), DatabaseError>;
}

#[async_trait]
impl<T: SlotStorage + ?Sized> SlotStorage for Arc<T> {
    async fn get_slot(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        (**self).get_slot(key).await
    }

    async fn set_slot(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        (**self).set_slot(key, value).await
    }

    async fn delete_slot(&self, key: &str) -> Result<(), DatabaseError> {
        (**self).delete_slot(key).await
    }
}

#[async_trait]
impl SlotStorage for PacerDb {
    async fn get_slot(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let mut rows = self
            .conn()
            .query("SELECT value FROM slots WHERE key = ?1", [key])
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row.get::<String>(0)?)),
            None => Ok(None),
        }
    }

    async fn set_slot(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn()
            .execute(
                "INSERT INTO slots (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
                 ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
                libsql::params![key, value],
            )
            .await?;
        Ok(())
    }

    async fn delete_slot(&self, key: &str) -> Result<(), DatabaseError> {
        self.conn()
            .execute("DELETE FROM slots WHERE key = ?1", [key])
            .await?;
        Ok(())
    }
}

/// In-process slot storage. Used by tests and by callers that do not need
/// durability.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, DatabaseError> {
        self.slots
            .lock()
            .map_err(|_| DatabaseError::InvalidState("memory storage lock poisoned".into()))
    }
}

#[async_trait]
impl SlotStorage for MemoryStorage {
    async fn get_slot(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set_slot(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete_slot(&self, key: &str) -> Result<(), DatabaseError> {
        self.lock()?.remove(key);
        Ok(())
    }
}
