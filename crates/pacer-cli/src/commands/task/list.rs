use pacer_core::enums::{Category, TaskStatus};
use pacer_db::TaskFilter;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_optional_enum;
use crate::commands::shared::rank::auto_rank;
use crate::context::AppContext;
use crate::output::output_tasks;

pub async fn run(
    status: Option<&str>,
    category: Option<&str>,
    limit: Option<u32>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let filter = TaskFilter {
        status: parse_optional_enum::<TaskStatus>(status, "status")?,
        category: parse_optional_enum::<Category>(category, "category")?,
    };
    let limit = effective_limit(limit, flags.limit, ctx.config.general.default_limit);

    auto_rank(ctx).await?;

    let mut tasks = ctx.store.list(&filter).await?;
    tasks.truncate(usize::try_from(limit)?);
    output_tasks(&tasks, flags.format)
}
