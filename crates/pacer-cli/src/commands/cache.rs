use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CacheCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ClearResponse {
    cleared: bool,
}

/// Handle `pacer cache`.
pub async fn handle(action: &CacheCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let cache = ctx.coordinator.cache();
    match action {
        CacheCommands::Status => output(&cache.status().await, flags.format),
        CacheCommands::Clear => {
            let cleared = cache.get().await.is_some();
            cache.clear().await?;
            output(&ClearResponse { cleared }, flags.format)
        }
    }
}
