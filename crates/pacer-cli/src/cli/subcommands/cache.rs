use clap::Subcommand;

/// Priority cache management.
#[derive(Clone, Debug, Subcommand)]
pub enum CacheCommands {
    /// Show the cached ranking's age and validity.
    Status,
    /// Drop the cached ranking so the next rank asks the oracle.
    Clear,
}
