use chrono::Utc;
use pacer_core::entities::{CachedReason, PriorityCacheEntry, Task};
use pacer_core::responses::{RankOutcome, RankResponse};
use pacer_rank::reconcile;

use crate::context::AppContext;
use crate::progress::Progress;

/// Reprioritize the stored tasks and persist the new presentation order.
///
/// Skipped and failed rankings leave the stored order alone. The order is
/// applied to a fresh read of the store, so writes that landed while the
/// oracle was working survive.
pub async fn rank_and_store(ctx: &AppContext, force: bool) -> anyhow::Result<RankResponse> {
    let snapshot = ctx.store.load().await?;

    let progress = Progress::spinner("Ranking tasks");
    let mut response = ctx.coordinator.reprioritize_with_outcome(snapshot, force).await;
    match response.outcome {
        RankOutcome::Failed => progress.finish_err("ranking unavailable, keeping current order"),
        _ => progress.finish_clear(),
    }

    if matches!(response.outcome, RankOutcome::Ranked | RankOutcome::CacheHit) {
        let current = ctx.store.load().await?;
        response.tasks = carry_order(&response.tasks, &current);
        ctx.store.save(&response.tasks).await?;
    }
    Ok(response)
}

/// Order `current` the way `ranked` orders its active tasks, keeping the
/// records from `current`.
fn carry_order(ranked: &[Task], current: &[Task]) -> Vec<Task> {
    let order = PriorityCacheEntry {
        data: ranked
            .iter()
            .filter(|t| t.is_active())
            .map(|t| CachedReason {
                id: t.id.clone(),
                priority_reason: t.priority_reason.clone(),
            })
            .collect(),
        at: Utc::now(),
    };
    reconcile(&order, current)
}

/// Run a non-forced ranking when `ranking.auto_rank` is on.
pub async fn auto_rank(ctx: &AppContext) -> anyhow::Result<()> {
    if ctx.config.ranking.auto_rank {
        let response = rank_and_store(ctx, false).await?;
        tracing::debug!(outcome = %response.outcome, "auto rank");
    }
    Ok(())
}
