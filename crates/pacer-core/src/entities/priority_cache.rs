use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One ranked task id and the rationale the oracle gave for it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CachedReason {
    pub id: String,
    pub priority_reason: Option<String>,
}

/// The last successful ranking: presentation order plus write time.
///
/// Replaced wholesale on every successful ranking, never edited in place.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PriorityCacheEntry {
    pub data: Vec<CachedReason>,
    pub at: DateTime<Utc>,
}

impl PriorityCacheEntry {
    /// Whether `id` was part of this ranking.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.data.iter().any(|r| r.id == id)
    }
}
