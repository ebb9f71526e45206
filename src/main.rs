//! dagcache - proof-of-work dataset cache files
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use dagcache::cli::{Cli, Commands, LogFormat};
use dagcache::config::ConfigManager;
use dagcache::error::DagResult;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> DagResult<()> {
    let cli = Cli::parse();

    // 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("dagcache=warn"),
        1 => EnvFilter::new("dagcache=info"),
        _ => EnvFilter::new("dagcache=debug"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    match cli.log_format {
        LogFormat::Text => subscriber.without_time().init(),
        LogFormat::Json => subscriber.json().init(),
    }

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load().await?;

    match cli.command {
        Commands::Prepare(args) => dagcache::cli::commands::prepare(args, &config).await,
        Commands::Path(args) => dagcache::cli::commands::path(args, &config).await,
        Commands::Inspect(args) => dagcache::cli::commands::inspect(args, &config).await,
        Commands::List(args) => dagcache::cli::commands::list(args, &config).await,
        Commands::Prune(args) => dagcache::cli::commands::prune(args, &config).await,
        Commands::Config(args) => {
            dagcache::cli::commands::config(args, &config, &config_manager).await
        }
    }
}
