use chrono::Local;
use pacer_db::stats::TaskStats;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output_stats;

/// Handle `pacer stats`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let tasks = ctx.store.load().await?;
    let stats = TaskStats::compute(&tasks, &Local::now());
    output_stats(&stats, flags.format)
}
