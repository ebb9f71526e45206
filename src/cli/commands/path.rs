//! Path command - print the dataset file path for a seed hash

use super::select;
use crate::cli::args::PathArgs;
use crate::config::Config;
use crate::error::DagResult;

/// Execute the path command
pub async fn execute(args: PathArgs, config: &Config) -> DagResult<()> {
    let (dir, identity) = select(&args.identity, config);
    println!("{}", identity.path_in(&dir)?.display());
    Ok(())
}
