use anyhow::Context;
use clap::Parser;
use pacer_config::PacerConfig;

mod cli;
mod commands;
mod context;
mod output;
mod progress;
mod ui;
mod write_lock;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("pacer error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    let config = PacerConfig::load_with_dotenv().context("failed to load pacer configuration")?;
    context::warn_unconfigured(&config);

    let db_path = context::resolve_db_path(&config, flags.db.as_deref())?;
    let write_lock = if command_requires_write_lock(&cli.command, config.ranking.auto_rank) {
        Some(write_lock::acquire_for_db(&db_path).await?)
    } else {
        None
    };

    let ctx = context::AppContext::init(config, db_path)
        .await
        .context("failed to initialize pacer application context")?;

    let result = commands::dispatch::dispatch(cli.command, &ctx, &flags).await;
    drop(write_lock);
    result
}

/// Commands that save the task list or the priority cache. `task list` only
/// writes when it auto-ranks.
fn command_requires_write_lock(command: &cli::Commands, auto_rank: bool) -> bool {
    use crate::cli::subcommands::{CacheCommands, TaskCommands};

    match command {
        cli::Commands::Task { action } => match action {
            TaskCommands::Get { .. } => false,
            TaskCommands::List { .. } => auto_rank,
            _ => true,
        },
        cli::Commands::Rank(_) => true,
        cli::Commands::Cache { action } => matches!(action, CacheCommands::Clear),
        cli::Commands::Stats => false,
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("PACER_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
