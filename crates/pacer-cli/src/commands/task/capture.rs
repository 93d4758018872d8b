use pacer_core::entities::TaskDraft;
use pacer_oracle::TaskParser;

use crate::cli::GlobalFlags;
use crate::commands::shared::rank::auto_rank;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

pub async fn run(text: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let text = text.trim();
    if text.is_empty() {
        anyhow::bail!("nothing to capture");
    }

    let progress = Progress::spinner("Reading task");
    let draft = match ctx.oracle.parse_task(text).await {
        Ok(draft) => {
            progress.finish_clear();
            draft
        }
        Err(error) => {
            progress.finish_err("could not parse task, saving it as written");
            tracing::warn!(%error, "task capture fell back to plain title");
            TaskDraft::titled(text)
        }
    };

    let task = ctx.store.create(draft).await?;
    auto_rank(ctx).await?;
    output(&task, flags.format)
}
