//! Reprioritization behavior end to end: cache, coordinator, and a scripted
//! oracle sharing one in-memory store and one manual clock.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use pacer_core::entities::{CachedReason, PriorityCacheEntry, Task, TaskDraft};
use pacer_core::enums::{Priority, TaskStatus, TimeOfDay};
use pacer_core::responses::RankOutcome;
use pacer_db::{MemoryStorage, SLOT_PRIORITY_CACHE, SlotStorage};
use pacer_oracle::{OracleError, Ranking, RankingOracle, TaskSummary};
use pacer_rank::{Coordinator, DEFAULT_TTL_SECS, ManualClock, PriorityCache, ttl_from_secs};
use pretty_assertions::assert_eq;
use rstest::rstest;

// --- Fixtures ---

enum Script {
    Reply(Ranking),
    Fail,
}

/// Oracle fake with a call counter and a record of what it was shown.
struct FakeOracle {
    script: Mutex<Script>,
    calls: AtomicUsize,
    seen: Mutex<Vec<(Vec<String>, TimeOfDay)>>,
    /// Times `rank` yields to the runtime before replying.
    yields: usize,
    in_rank: AtomicUsize,
    max_in_rank: AtomicUsize,
}

impl FakeOracle {
    fn scripted(script: Script) -> Self {
        Self {
            script: Mutex::new(script),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            yields: 0,
            in_rank: AtomicUsize::new(0),
            max_in_rank: AtomicUsize::new(0),
        }
    }

    fn replying(order: &[&str], reasons: &[(&str, &str)]) -> Self {
        Self::scripted(Script::Reply(ranking(order, reasons)))
    }

    fn failing() -> Self {
        Self::scripted(Script::Fail)
    }

    /// Suspend inside every `rank` call so concurrent callers get polled.
    fn suspending(mut self, yields: usize) -> Self {
        self.yields = yields;
        self
    }

    fn max_concurrent_calls(&self) -> usize {
        self.max_in_rank.load(Ordering::SeqCst)
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_seen(&self) -> (Vec<String>, TimeOfDay) {
        self.seen.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl RankingOracle for FakeOracle {
    async fn rank(
        &self,
        tasks: &[TaskSummary],
        time_of_day: TimeOfDay,
    ) -> Result<Ranking, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push((tasks.iter().map(|t| t.id.clone()).collect(), time_of_day));

        let inside = self.in_rank.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_rank.fetch_max(inside, Ordering::SeqCst);
        for _ in 0..self.yields {
            tokio::task::yield_now().await;
        }
        self.in_rank.fetch_sub(1, Ordering::SeqCst);

        match &*self.script.lock().unwrap() {
            Script::Reply(ranking) => Ok(ranking.clone()),
            Script::Fail => Err(OracleError::Parse("model replied with prose".into())),
        }
    }
}

struct Harness {
    oracle: Arc<FakeOracle>,
    clock: Arc<ManualClock>,
    storage: Arc<MemoryStorage>,
    coordinator: Coordinator<Arc<FakeOracle>, Arc<MemoryStorage>>,
}

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap()
}

fn harness(oracle: FakeOracle) -> Harness {
    let oracle = Arc::new(oracle);
    let clock = Arc::new(ManualClock::new(start()));
    let storage = Arc::new(MemoryStorage::new());
    let cache = PriorityCache::new(
        Arc::clone(&storage),
        clock.clone(),
        ttl_from_secs(DEFAULT_TTL_SECS),
    );
    Harness {
        coordinator: Coordinator::new(Arc::clone(&oracle), cache),
        oracle,
        clock,
        storage,
    }
}

fn ranking(order: &[&str], reasons: &[(&str, &str)]) -> Ranking {
    Ranking {
        order: order.iter().map(ToString::to_string).collect(),
        reasons: reasons
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect(),
    }
}

fn task(id: &str, priority: Priority) -> Task {
    Task::from_draft(
        id.to_string(),
        TaskDraft {
            priority,
            ..TaskDraft::titled(format!("Task {id}"))
        },
        start(),
    )
}

fn done(id: &str) -> Task {
    Task {
        status: TaskStatus::Done,
        done_at: Some(start()),
        ..task(id, Priority::Medium)
    }
}

fn ids(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|t| t.id.as_str()).collect()
}

async fn raw_cache(storage: &MemoryStorage) -> Option<String> {
    storage.get_slot(SLOT_PRIORITY_CACHE).await.unwrap()
}

// --- Ranking, cache hits, edits, expiry ---

#[tokio::test]
async fn fresh_ranking_is_applied_and_cached() {
    let h = harness(FakeOracle::replying(&["T2", "T1"], &[("T2", "quick win")]));
    let tasks = vec![task("T1", Priority::High), task("T2", Priority::Low)];

    let response = h.coordinator.reprioritize_with_outcome(tasks, false).await;

    assert_eq!(response.outcome, RankOutcome::Ranked);
    assert_eq!(h.oracle.calls(), 1);
    assert_eq!(h.oracle.last_seen().0, vec!["T1", "T2"]);
    assert_eq!(ids(&response.tasks), vec!["T2", "T1"]);
    assert_eq!(response.tasks[0].priority_reason.as_deref(), Some("quick win"));
    assert_eq!(response.tasks[1].priority_reason, None);

    let entry = h.coordinator.cache().get().await.unwrap();
    assert_eq!(
        entry,
        PriorityCacheEntry {
            data: vec![
                CachedReason {
                    id: "T2".into(),
                    priority_reason: Some("quick win".into()),
                },
                CachedReason {
                    id: "T1".into(),
                    priority_reason: None,
                },
            ],
            at: start(),
        }
    );
}

#[tokio::test]
async fn new_task_appended_after_cached_order() {
    let h = harness(FakeOracle::replying(&["T2", "T1"], &[("T2", "quick win")]));
    let ranked = h
        .coordinator
        .reprioritize(vec![task("T1", Priority::High), task("T2", Priority::Low)], false)
        .await;

    h.clock.advance(TimeDelta::minutes(20));
    let mut tasks = ranked;
    tasks.push(task("T3", Priority::Medium));

    let response = h.coordinator.reprioritize_with_outcome(tasks, false).await;
    assert_eq!(response.outcome, RankOutcome::CacheHit);
    assert_eq!(ids(&response.tasks), vec!["T2", "T1", "T3"]);
    assert_eq!(h.oracle.calls(), 1);
}

#[tokio::test]
async fn deleted_task_is_dropped_and_cache_untouched() {
    let h = harness(FakeOracle::replying(&["T2", "T1"], &[("T2", "quick win")]));
    let ranked = h
        .coordinator
        .reprioritize(vec![task("T1", Priority::High), task("T2", Priority::Low)], false)
        .await;
    let mut tasks = ranked;
    tasks.push(task("T3", Priority::Medium));
    let before = raw_cache(&h.storage).await;

    tasks.retain(|t| t.id != "T1");
    let out = h.coordinator.reprioritize(tasks, false).await;

    assert_eq!(ids(&out), vec!["T2", "T3"]);
    assert_eq!(h.oracle.calls(), 1);
    assert_eq!(raw_cache(&h.storage).await, before);
}

#[tokio::test]
async fn expired_cache_calls_oracle() {
    let h = harness(FakeOracle::replying(&["B", "A"], &[]));
    h.coordinator
        .cache()
        .put(vec![CachedReason {
            id: "A".into(),
            priority_reason: None,
        }])
        .await
        .unwrap();
    h.clock.advance(TimeDelta::hours(2));

    let response = h
        .coordinator
        .reprioritize_with_outcome(vec![task("A", Priority::Low), task("B", Priority::High)], false)
        .await;

    assert_eq!(h.oracle.calls(), 1);
    assert_eq!(response.outcome, RankOutcome::Ranked);
    assert_eq!(ids(&response.tasks), vec!["B", "A"]);
    assert_eq!(
        h.coordinator.cache().get().await.unwrap().at,
        start() + TimeDelta::hours(2)
    );
}

// --- Reconciliation and failure guarantees ---

#[tokio::test]
async fn reconciliation_is_idempotent() {
    let h = harness(FakeOracle::replying(&["C", "A", "B"], &[("A", "due")]));
    let tasks = vec![task("A", Priority::High), task("B", Priority::Low), task("C", Priority::Low)];
    h.coordinator.reprioritize(tasks.clone(), false).await;

    let first = h.coordinator.reprioritize(tasks.clone(), false).await;
    let second = h.coordinator.reprioritize(tasks, false).await;
    assert_eq!(first, second);
    assert_eq!(h.oracle.calls(), 1);
}

#[tokio::test]
async fn stale_ids_never_resurrect() {
    let h = harness(FakeOracle::replying(&[], &[]));
    h.coordinator
        .cache()
        .put(
            ["gone-1", "A", "gone-2", "B"]
                .into_iter()
                .map(|id| CachedReason {
                    id: id.into(),
                    priority_reason: None,
                })
                .collect(),
        )
        .await
        .unwrap();

    let out = h
        .coordinator
        .reprioritize(vec![task("B", Priority::Low), task("A", Priority::Low)], false)
        .await;
    assert_eq!(ids(&out), vec!["A", "B"]);
}

#[rstest]
#[case::no_cache(None)]
#[case::partial_cache(Some(vec!["B"]))]
#[case::cache_with_extras(Some(vec!["X", "C", "A", "C"]))]
#[tokio::test]
async fn every_active_task_appears_once(#[case] cached: Option<Vec<&str>>) {
    let h = harness(FakeOracle::replying(&["A", "A", "Z"], &[]));
    if let Some(ids) = cached {
        h.coordinator
            .cache()
            .put(
                ids.into_iter()
                    .map(|id| CachedReason {
                        id: id.into(),
                        priority_reason: None,
                    })
                    .collect(),
            )
            .await
            .unwrap();
    }
    let tasks = vec![
        task("A", Priority::High),
        done("D"),
        task("B", Priority::Low),
        task("C", Priority::Medium),
    ];

    let out = h.coordinator.reprioritize(tasks, false).await;

    let mut active: Vec<&str> = out
        .iter()
        .filter(|t| t.is_active())
        .map(|t| t.id.as_str())
        .collect();
    active.sort_unstable();
    assert_eq!(active, vec!["A", "B", "C"]);
    assert_eq!(out.len(), 4);
    assert_eq!(out.last().map(|t| t.id.as_str()), Some("D"));
}

#[rstest]
#[case::empty(vec![])]
#[case::one_active(vec![task("A", Priority::High)])]
#[case::one_active_many_done(vec![done("D1"), task("A", Priority::High), done("D2")])]
#[tokio::test]
async fn below_threshold_skips_oracle(#[case] tasks: Vec<Task>) {
    let h = harness(FakeOracle::replying(&["A"], &[]));
    let response = h.coordinator.reprioritize_with_outcome(tasks.clone(), true).await;

    assert_eq!(response.outcome, RankOutcome::Skipped);
    assert_eq!(response.tasks, tasks);
    assert_eq!(h.oracle.calls(), 0);
    assert_eq!(raw_cache(&h.storage).await, None);
}

#[rstest]
#[case::fifty_nine_minutes(59, 1)]
#[case::sixty_one_minutes(61, 2)]
#[tokio::test]
async fn cache_is_reused_only_inside_ttl(#[case] minutes: i64, #[case] expected_calls: usize) {
    let h = harness(FakeOracle::replying(&["A", "B"], &[]));
    let tasks = vec![task("A", Priority::High), task("B", Priority::Low)];
    h.coordinator.reprioritize(tasks.clone(), false).await;

    h.clock.advance(TimeDelta::minutes(minutes));
    h.coordinator.reprioritize(tasks, false).await;
    assert_eq!(h.oracle.calls(), expected_calls);
}

#[tokio::test]
async fn failure_returns_input_and_keeps_cache() {
    let h = harness(FakeOracle::failing());
    h.coordinator
        .cache()
        .put(vec![
            CachedReason {
                id: "B".into(),
                priority_reason: Some("first".into()),
            },
            CachedReason {
                id: "A".into(),
                priority_reason: None,
            },
        ])
        .await
        .unwrap();
    let before = raw_cache(&h.storage).await;
    let tasks = vec![task("A", Priority::High), done("D"), task("B", Priority::Low)];

    let response = h.coordinator.reprioritize_with_outcome(tasks.clone(), true).await;

    assert_eq!(response.outcome, RankOutcome::Failed);
    assert_eq!(response.tasks, tasks);
    assert_eq!(h.oracle.calls(), 1);
    assert_eq!(raw_cache(&h.storage).await, before);
}

// --- Coordinator details ---

#[tokio::test]
async fn force_bypasses_valid_cache() {
    let h = harness(FakeOracle::replying(&["A", "B"], &[]));
    let tasks = vec![task("A", Priority::High), task("B", Priority::Low)];
    h.coordinator.reprioritize(tasks.clone(), false).await;
    h.clock.advance(TimeDelta::minutes(5));

    let response = h.coordinator.reprioritize_with_outcome(tasks, true).await;
    assert_eq!(response.outcome, RankOutcome::Ranked);
    assert_eq!(h.oracle.calls(), 2);
    assert_eq!(
        h.coordinator.cache().get().await.unwrap().at,
        start() + TimeDelta::minutes(5)
    );
}

#[tokio::test]
async fn unavailable_oracle_is_a_quiet_no_op() {
    struct Unavailable;

    #[async_trait]
    impl RankingOracle for Unavailable {
        async fn rank(&self, _: &[TaskSummary], _: TimeOfDay) -> Result<Ranking, OracleError> {
            Err(OracleError::Unavailable("oracle.api_key is not set".into()))
        }
    }

    let storage = Arc::new(MemoryStorage::new());
    let cache = PriorityCache::new(
        Arc::clone(&storage),
        Arc::new(ManualClock::new(start())),
        ttl_from_secs(DEFAULT_TTL_SECS),
    );
    let coordinator = Coordinator::new(Unavailable, cache);
    let tasks = vec![task("A", Priority::High), task("B", Priority::Low)];

    assert_eq!(coordinator.reprioritize(tasks.clone(), false).await, tasks);
    assert_eq!(raw_cache(&storage).await, None);
}

#[tokio::test]
async fn malformed_cache_falls_through_to_oracle() {
    let h = harness(FakeOracle::replying(&["B", "A"], &[]));
    h.storage
        .set_slot(SLOT_PRIORITY_CACHE, "{\"data\": [")
        .await
        .unwrap();

    let out = h
        .coordinator
        .reprioritize(vec![task("A", Priority::High), task("B", Priority::Low)], false)
        .await;
    assert_eq!(ids(&out), vec!["B", "A"]);
    assert_eq!(h.oracle.calls(), 1);
}

#[rstest]
#[case::morning(8, TimeOfDay::Morning)]
#[case::afternoon(13, TimeOfDay::Afternoon)]
#[case::evening(20, TimeOfDay::Evening)]
#[tokio::test]
async fn oracle_receives_time_of_day_bucket(#[case] hour: u32, #[case] expected: TimeOfDay) {
    let h = harness(FakeOracle::replying(&[], &[]));
    h.clock
        .set(Utc.with_ymd_and_hms(2026, 3, 10, hour, 30, 0).unwrap());
    h.coordinator
        .reprioritize(vec![task("A", Priority::High), task("B", Priority::Low)], true)
        .await;
    assert_eq!(h.oracle.last_seen().1, expected);
}

#[tokio::test]
async fn min_active_is_configurable() {
    let h = harness(FakeOracle::replying(&["C", "B", "A"], &[]));
    let coordinator = {
        let cache = PriorityCache::new(
            Arc::clone(&h.storage),
            h.clock.clone(),
            ttl_from_secs(DEFAULT_TTL_SECS),
        );
        Coordinator::new(Arc::clone(&h.oracle), cache).with_min_active(3)
    };

    let two = vec![task("A", Priority::High), task("B", Priority::Low)];
    let response = coordinator.reprioritize_with_outcome(two, false).await;
    assert_eq!(response.outcome, RankOutcome::Skipped);

    let three = vec![
        task("A", Priority::High),
        task("B", Priority::Low),
        task("C", Priority::Low),
    ];
    let response = coordinator.reprioritize_with_outcome(three, false).await;
    assert_eq!(response.outcome, RankOutcome::Ranked);
    assert_eq!(h.oracle.calls(), 1);
}

#[tokio::test]
async fn overlapping_calls_rank_once_then_hit_cache() {
    let h = harness(FakeOracle::replying(&["B", "A"], &[("B", "quick win")]).suspending(8));
    let tasks = vec![task("A", Priority::High), task("B", Priority::Low)];

    let (first, second) = tokio::join!(
        h.coordinator.reprioritize_with_outcome(tasks.clone(), false),
        h.coordinator.reprioritize_with_outcome(tasks.clone(), false),
    );

    assert_eq!(first.outcome, RankOutcome::Ranked);
    assert_eq!(second.outcome, RankOutcome::CacheHit);
    assert_eq!(h.oracle.calls(), 1);
    assert_eq!(h.oracle.max_concurrent_calls(), 1);
    assert_eq!(ids(&first.tasks), vec!["B", "A"]);
    assert_eq!(first.tasks, second.tasks);
}

#[tokio::test]
async fn overlapping_forced_calls_take_turns() {
    let h = harness(FakeOracle::replying(&["B", "A"], &[]).suspending(8));
    let tasks = vec![task("A", Priority::High), task("B", Priority::Low)];

    let (first, second) = tokio::join!(
        h.coordinator.reprioritize_with_outcome(tasks.clone(), true),
        h.coordinator.reprioritize_with_outcome(tasks.clone(), true),
    );

    assert_eq!(first.outcome, RankOutcome::Ranked);
    assert_eq!(second.outcome, RankOutcome::Ranked);
    assert_eq!(h.oracle.calls(), 2);
    assert_eq!(h.oracle.max_concurrent_calls(), 1);
}
