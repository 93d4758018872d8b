//! Ranking and priority cache configuration.

use serde::{Deserialize, Serialize};

/// One hour.
const fn default_cache_ttl_secs() -> u64 {
    3600
}

const fn default_min_active_tasks() -> usize {
    2
}

const fn default_auto_rank() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RankingConfig {
    /// How long a cached ranking is reused before the oracle is asked again.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Rankings are skipped below this many active tasks.
    #[serde(default = "default_min_active_tasks")]
    pub min_active_tasks: usize,

    /// Reprioritize automatically on `task add`, `task capture`, and `task list`.
    #[serde(default = "default_auto_rank")]
    pub auto_rank: bool,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_cache_ttl_secs(),
            min_active_tasks: default_min_active_tasks(),
            auto_rank: default_auto_rank(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = RankingConfig::default();
        assert_eq!(config.cache_ttl_secs, 3600);
        assert_eq!(config.min_active_tasks, 2);
        assert!(config.auto_rank);
    }
}
