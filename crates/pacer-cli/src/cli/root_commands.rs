use clap::{Args, Subcommand};

use crate::cli::subcommands::{CacheCommands, TaskCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Tasks.
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// Order active tasks, reusing a fresh cached ranking when there is one.
    Rank(RankArgs),
    /// Priority cache management.
    Cache {
        #[command(subcommand)]
        action: CacheCommands,
    },
    /// Productivity statistics.
    Stats,
}

/// Arguments for `pacer rank`.
#[derive(Clone, Debug, Args)]
pub struct RankArgs {
    /// Ask the oracle even if the cached ranking is still fresh.
    #[arg(long)]
    pub force: bool,
}
