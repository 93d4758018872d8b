//! The priority cache: at most one ranking, valid for a TTL window, stored
//! in the `priority_cache` slot.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::TimeDelta;
use pacer_core::entities::{CachedReason, PriorityCacheEntry, Task};
use pacer_core::responses::CacheStatusResponse;
use pacer_db::error::DatabaseError;
use pacer_db::{SLOT_PRIORITY_CACHE, SlotStorage};

use crate::clock::Clock;

/// Default reuse window for a ranking, in seconds.
pub const DEFAULT_TTL_SECS: u64 = 3600;

/// Convert a configured TTL in seconds, saturating on overflow.
#[must_use]
pub fn ttl_from_secs(secs: u64) -> TimeDelta {
    i64::try_from(secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .unwrap_or(TimeDelta::MAX)
}

pub struct PriorityCache<S> {
    storage: S,
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
}

impl<S: SlotStorage> PriorityCache<S> {
    pub fn new(storage: S, clock: Arc<dyn Clock>, ttl: TimeDelta) -> Self {
        Self {
            storage,
            clock,
            ttl,
        }
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub const fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// The stored entry verbatim, regardless of age. Unreadable or malformed
    /// records read as absent.
    pub async fn get(&self) -> Option<PriorityCacheEntry> {
        let raw = match self.storage.get_slot(SLOT_PRIORITY_CACHE).await {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(%e, "priority cache unreadable, treating as absent");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(%e, "malformed priority cache record, treating as absent");
                None
            }
        }
    }

    pub async fn is_valid(&self) -> bool {
        self.valid_entry().await.is_some()
    }

    /// The stored entry if it is still inside the TTL window.
    pub async fn valid_entry(&self) -> Option<PriorityCacheEntry> {
        self.get().await.filter(|entry| self.is_fresh(entry))
    }

    /// Replace the slot with a new entry stamped now.
    ///
    /// # Errors
    ///
    /// Propagates the storage write failure.
    pub async fn put(&self, data: Vec<CachedReason>) -> Result<PriorityCacheEntry, DatabaseError> {
        let entry = PriorityCacheEntry {
            data,
            at: self.clock.now(),
        };
        let raw = serde_json::to_string(&entry)?;
        self.storage.set_slot(SLOT_PRIORITY_CACHE, &raw).await?;
        tracing::debug!(entries = entry.data.len(), at = %entry.at, "priority cache written");
        Ok(entry)
    }

    /// Drop the stored entry, if any.
    ///
    /// # Errors
    ///
    /// Propagates the storage delete failure.
    pub async fn clear(&self) -> Result<(), DatabaseError> {
        self.storage.delete_slot(SLOT_PRIORITY_CACHE).await
    }

    pub async fn status(&self) -> CacheStatusResponse {
        let Some(entry) = self.get().await else {
            return CacheStatusResponse {
                present: false,
                valid: false,
                written_at: None,
                age_secs: None,
                expires_in_secs: None,
                entries: 0,
            };
        };

        let age = self.clock.now() - entry.at;
        CacheStatusResponse {
            present: true,
            valid: self.is_fresh(&entry),
            written_at: Some(entry.at),
            age_secs: Some(age.num_seconds()),
            expires_in_secs: Some(
                self.ttl
                    .checked_sub(&age)
                    .map_or(i64::MAX, |left| left.num_seconds().max(0)),
            ),
            entries: u32::try_from(entry.data.len()).unwrap_or(u32::MAX),
        }
    }

    /// A future `at` gives a negative age, which is inside the window.
    fn is_fresh(&self, entry: &PriorityCacheEntry) -> bool {
        self.clock.now() - entry.at < self.ttl
    }
}

/// Merge a cached order with the current task list.
///
/// Output is the cached order restricted to tasks that are still active
/// (each carrying its cached reason), then active tasks the cache has never
/// seen, then every non-active task. Each group keeps its input order.
#[must_use]
pub fn reconcile(entry: &PriorityCacheEntry, tasks: &[Task]) -> Vec<Task> {
    let active: HashMap<&str, &Task> = tasks
        .iter()
        .filter(|t| t.is_active())
        .map(|t| (t.id.as_str(), t))
        .collect();

    let mut emitted: HashSet<&str> = HashSet::with_capacity(active.len());
    let mut out = Vec::with_capacity(tasks.len());

    for cached in &entry.data {
        let Some(&task) = active.get(cached.id.as_str()) else {
            continue;
        };
        if !emitted.insert(task.id.as_str()) {
            continue;
        }
        out.push(Task {
            priority_reason: cached.priority_reason.clone(),
            ..task.clone()
        });
    }

    let cached_ids: HashSet<&str> = entry.data.iter().map(|c| c.id.as_str()).collect();
    out.extend(
        tasks
            .iter()
            .filter(|t| t.is_active() && !cached_ids.contains(t.id.as_str()))
            .cloned(),
    );
    out.extend(tasks.iter().filter(|t| !t.is_active()).cloned());
    out
}
