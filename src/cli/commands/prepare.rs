//! Prepare command - locate, validate or allocate a dataset file

use super::{blocking, payload_size, select};
use crate::cli::args::{OutputFormat, PrepareArgs};
use crate::config::Config;
use crate::dag::{format_bytes, resolve, Outcome, Resolution};
use crate::error::{DagError, DagResult};
use console::style;
use std::path::Path;
use tracing::warn;

/// Execute the prepare command
pub async fn execute(args: PrepareArgs, config: &Config) -> DagResult<()> {
    let (dir, identity) = select(&args.identity, config);
    let size = payload_size(args.size.size, args.size.epoch)?
        .ok_or_else(|| DagError::User("Either --size or --epoch is required".to_string()))?;
    let force = args.force;

    let resolution = blocking(move || resolve(&dir, &identity, size, force)).await?;

    match resolution {
        Resolution::Match(file) => print_outcome(Outcome::Match, file.path(), size, args.format),
        Resolution::Mismatch(file) => {
            print_outcome(Outcome::Mismatch, file.path(), size, args.format)
        }
        Resolution::SizeMismatch(untrusted) => {
            warn!(
                "Refusing dataset {}: {}",
                untrusted.path.display(),
                untrusted.reason
            );
            Err(untrusted.into_error())
        }
    }
}

fn print_outcome(outcome: Outcome, path: &Path, size: u64, format: OutputFormat) -> DagResult<()> {
    match format {
        OutputFormat::Table => {
            let (mark, detail) = match outcome {
                Outcome::Match => (style("✓").green(), "valid dataset, ready to reuse"),
                _ => (style("○").yellow(), "allocated, payload must be generated"),
            };
            println!("{} {} [{}]", mark, outcome, detail);
            println!("  path:    {}", path.display());
            println!("  payload: {} ({} bytes)", format_bytes(size), size);
        }
        OutputFormat::Json => {
            let report = serde_json::json!({
                "outcome": outcome,
                "path": path,
                "payload_size": size,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Plain => println!("{}", outcome),
    }
    Ok(())
}
