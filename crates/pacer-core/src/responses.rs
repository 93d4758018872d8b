//! CLI response types returned as JSON by `pacer` commands.
//!
//! These structs define the shape of output for `pacer rank`,
//! `pacer cache status`, and `pacer stats`.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Task;
use crate::enums::Category;

/// What a reprioritize call ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RankOutcome {
    /// Fewer active tasks than the ranking threshold; nothing to order.
    Skipped,
    /// A valid cached ranking was reconciled against the current tasks.
    CacheHit,
    /// The oracle produced a fresh ranking and the cache was rewritten.
    Ranked,
    /// The oracle was unavailable or failed; the input order was kept.
    Failed,
}

impl RankOutcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Skipped => "skipped",
            Self::CacheHit => "cache_hit",
            Self::Ranked => "ranked",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for RankOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response from `pacer rank`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RankResponse {
    pub outcome: RankOutcome,
    pub tasks: Vec<Task>,
}

/// Response from `pacer cache status`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CacheStatusResponse {
    pub present: bool,
    pub valid: bool,
    pub written_at: Option<DateTime<Utc>>,
    pub age_secs: Option<i64>,
    pub expires_in_secs: Option<i64>,
    pub entries: u32,
}

/// Per-category completion counts.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CategoryStats {
    pub category: Category,
    pub active: u32,
    pub done: u32,
}

/// Response from `pacer stats`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct StatsResponse {
    pub total: u32,
    pub active: u32,
    pub done: u32,
    /// Share of tasks that are done, in `0.0..=1.0`. Zero when there are no tasks.
    pub completion_rate: f64,
    pub done_today: u32,
    pub done_last_7_days: u32,
    pub overdue: u32,
    /// Consecutive days, ending today or yesterday, with at least one completion.
    pub streak_days: u32,
    pub by_category: Vec<CategoryStats>,
}
