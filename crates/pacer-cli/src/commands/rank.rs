use crate::cli::GlobalFlags;
use crate::cli::root_commands::RankArgs;
use crate::commands::shared::rank::rank_and_store;
use crate::context::AppContext;
use crate::output::output_rank;

/// Handle `pacer rank`.
pub async fn handle(args: &RankArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = rank_and_store(ctx, args.force).await?;
    output_rank(&response, flags.format)
}
