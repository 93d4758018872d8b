//! # pacer-rank
//!
//! Orders the task list for presentation.
//!
//! [`Coordinator::reprioritize`] reuses a cached ranking while it is inside
//! its TTL window, reconciling it against tasks added, completed, or deleted
//! since, and otherwise asks the [`pacer_oracle::RankingOracle`] for a fresh
//! one. Ranking is an enhancement: every failure path hands back the input.

pub mod cache;
pub mod clock;
pub mod coordinator;

pub use cache::{DEFAULT_TTL_SECS, PriorityCache, reconcile, ttl_from_secs};
pub use clock::{Clock, ManualClock, SystemClock};
pub use coordinator::{Coordinator, DEFAULT_MIN_ACTIVE};
