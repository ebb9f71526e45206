//! Prune command - remove stale dataset files

use super::{blocking, dataset_dir};
use crate::cli::args::PruneArgs;
use crate::config::Config;
use crate::dag::{format_bytes, prune};
use crate::error::DagResult;
use console::style;

/// Execute the prune command
pub async fn execute(args: PruneArgs, config: &Config) -> DagResult<()> {
    let dir = dataset_dir(args.dir, config);
    let keep = args.keep.unwrap_or(config.dataset.datasets_on_disk) as usize;
    let revision = config.dataset.revision;
    let dry_run = args.dry_run;

    let scan_dir = dir.clone();
    let removed = blocking(move || prune(&scan_dir, revision, keep, dry_run)).await?;

    if removed.is_empty() {
        println!("No stale datasets in {}", dir.display());
        return Ok(());
    }

    let freed: u64 = removed.iter().map(|e| e.length).sum();
    for entry in &removed {
        println!(
            "  {} {} (R{}, {})",
            style("•").red(),
            entry.file_name(),
            entry.revision,
            format_bytes(entry.length)
        );
    }
    println!();

    if dry_run {
        println!(
            "Dry run - {} dataset(s) would be removed, freeing {}.",
            removed.len(),
            format_bytes(freed)
        );
    } else {
        println!(
            "{} removed {} dataset(s), freed {}",
            style("✓").green(),
            removed.len(),
            format_bytes(freed)
        );
    }

    Ok(())
}
