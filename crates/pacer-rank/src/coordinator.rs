//! Reprioritization: decide the presentation order of a task list.

use std::collections::{HashMap, HashSet};

use pacer_core::entities::{CachedReason, Task};
use pacer_core::enums::TimeOfDay;
use pacer_core::responses::{RankOutcome, RankResponse};
use pacer_db::SlotStorage;
use pacer_oracle::{Ranking, RankingOracle, TaskSummary};
use tokio::sync::Mutex;

use crate::cache::{PriorityCache, reconcile};

/// Fewer active tasks than this and there is nothing worth ordering.
pub const DEFAULT_MIN_ACTIVE: usize = 2;

pub struct Coordinator<O, S> {
    oracle: O,
    cache: PriorityCache<S>,
    min_active: usize,
    /// Held across the cache check, oracle call, and cache write so that
    /// overlapping calls queue instead of interleaving.
    in_flight: Mutex<()>,
}

impl<O: RankingOracle, S: SlotStorage> Coordinator<O, S> {
    pub fn new(oracle: O, cache: PriorityCache<S>) -> Self {
        Self {
            oracle,
            cache,
            min_active: DEFAULT_MIN_ACTIVE,
            in_flight: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn with_min_active(mut self, min_active: usize) -> Self {
        self.min_active = min_active;
        self
    }

    pub const fn cache(&self) -> &PriorityCache<S> {
        &self.cache
    }

    pub const fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Ordered tasks. Never fails: on any trouble the input comes back as is.
    pub async fn reprioritize(&self, tasks: Vec<Task>, force: bool) -> Vec<Task> {
        self.reprioritize_with_outcome(tasks, force).await.tasks
    }

    /// Like [`Self::reprioritize`], also reporting which path was taken.
    pub async fn reprioritize_with_outcome(&self, tasks: Vec<Task>, force: bool) -> RankResponse {
        let active_count = tasks.iter().filter(|t| t.is_active()).count();
        if active_count < self.min_active {
            tracing::debug!(active_count, min = self.min_active, "too few active tasks to rank");
            return RankResponse {
                outcome: RankOutcome::Skipped,
                tasks,
            };
        }

        let _guard = self.in_flight.lock().await;

        if !force {
            if let Some(entry) = self.cache.valid_entry().await {
                tracing::debug!(cached = entry.data.len(), "using cached ranking");
                return RankResponse {
                    outcome: RankOutcome::CacheHit,
                    tasks: reconcile(&entry, &tasks),
                };
            }
        }

        let summaries: Vec<TaskSummary> = tasks
            .iter()
            .filter(|t| t.is_active())
            .map(TaskSummary::from)
            .collect();
        let time_of_day = TimeOfDay::from_hour(self.cache.clock().local_hour());

        let ranking = match self.oracle.rank(&summaries, time_of_day).await {
            Ok(ranking) => ranking,
            Err(e) => {
                tracing::warn!(%e, "ranking failed, keeping current order");
                return RankResponse {
                    outcome: RankOutcome::Failed,
                    tasks,
                };
            }
        };

        let ordered = apply_ranking(&tasks, &ranking);
        let reasons: Vec<CachedReason> = ordered
            .iter()
            .filter(|t| t.is_active())
            .map(|t| CachedReason {
                id: t.id.clone(),
                priority_reason: t.priority_reason.clone(),
            })
            .collect();
        if let Err(e) = self.cache.put(reasons).await {
            tracing::warn!(%e, "could not write priority cache");
        }

        tracing::info!(
            ranked = active_count,
            %time_of_day,
            returned = ranking.order.len(),
            "tasks reprioritized"
        );
        RankResponse {
            outcome: RankOutcome::Ranked,
            tasks: ordered,
        }
    }
}

/// Active tasks in the oracle's order (unknown and repeated ids dropped),
/// then active tasks the oracle left out, then everything else.
fn apply_ranking(tasks: &[Task], ranking: &Ranking) -> Vec<Task> {
    let active: HashMap<&str, &Task> = tasks
        .iter()
        .filter(|t| t.is_active())
        .map(|t| (t.id.as_str(), t))
        .collect();

    let mut placed: HashSet<&str> = HashSet::with_capacity(active.len());
    let mut out = Vec::with_capacity(tasks.len());

    for id in &ranking.order {
        let Some(&task) = active.get(id.as_str()) else {
            tracing::debug!(id, "oracle returned an unknown id");
            continue;
        };
        if placed.insert(task.id.as_str()) {
            out.push(Task {
                priority_reason: ranking.reasons.get(id).cloned(),
                ..task.clone()
            });
        }
    }

    out.extend(
        tasks
            .iter()
            .filter(|t| t.is_active() && !placed.contains(t.id.as_str()))
            .map(|t| Task {
                priority_reason: None,
                ..t.clone()
            }),
    );
    out.extend(tasks.iter().filter(|t| !t.is_active()).cloned());
    out
}
