//! CLI argument definitions using clap derive

use crate::dag::SeedHash;
use clap::{ArgAction, ArgGroup, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// dagcache - proof-of-work dataset cache files
///
/// Locates, validates and allocates on-disk DAG datasets keyed by
/// epoch seed hash.
#[derive(Parser, Debug)]
#[command(name = "dagcache")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Log output format
    #[arg(long, global = true, default_value = "text")]
    pub log_format: LogFormat,

    /// Configuration file path
    #[arg(short, long, global = true, env = "DAGCACHE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Locate and validate a dataset, or allocate a fresh file
    Prepare(PrepareArgs),

    /// Print the dataset file path for a seed hash
    Path(PathArgs),

    /// Show the state of a dataset file without modifying it
    Inspect(InspectArgs),

    /// List dataset files in the dataset directory
    List(ListArgs),

    /// Remove stale dataset files
    Prune(PruneArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Seed hash plus dataset directory
#[derive(Parser, Debug)]
pub struct IdentityArgs {
    /// Epoch seed hash (64 hex characters, optional 0x prefix)
    #[arg(short, long, value_parser = parse_seed)]
    pub seed: SeedHash,

    /// Dataset directory (defaults to config, then platform default)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Format revision (defaults to config)
    #[arg(long)]
    pub revision: Option<u32>,
}

/// Payload size given directly or derived from an epoch
#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("dataset_size").required(true).args(["size", "epoch"])))]
pub struct SizeArgs {
    /// Payload size in bytes, header excluded
    #[arg(long)]
    pub size: Option<u64>,

    /// Derive the payload size from this epoch
    #[arg(long)]
    pub epoch: Option<u64>,
}

/// Arguments for the prepare command
#[derive(Parser, Debug)]
pub struct PrepareArgs {
    #[command(flatten)]
    pub identity: IdentityArgs,

    #[command(flatten)]
    pub size: SizeArgs,

    /// Recreate the file even if a valid one exists
    #[arg(short, long)]
    pub force: bool,

    /// Output format
    #[arg(long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the path command
#[derive(Parser, Debug)]
pub struct PathArgs {
    #[command(flatten)]
    pub identity: IdentityArgs,
}

/// Arguments for the inspect command
#[derive(Parser, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub identity: IdentityArgs,

    /// Expected payload size in bytes
    #[arg(long, conflicts_with = "epoch")]
    pub size: Option<u64>,

    /// Derive the expected payload size from this epoch
    #[arg(long)]
    pub epoch: Option<u64>,

    /// Output format
    #[arg(long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Dataset directory (defaults to config, then platform default)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the prune command
#[derive(Parser, Debug)]
pub struct PruneArgs {
    /// Dataset directory (defaults to config, then platform default)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Datasets of the current revision to keep (default: from config)
    #[arg(short, long)]
    pub keep: Option<u32>,

    /// Dry run - show what would be removed
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for reports
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per event
    Json,
}

fn parse_seed(s: &str) -> Result<SeedHash, String> {
    s.parse::<SeedHash>().map_err(|e| e.to_string())
}
