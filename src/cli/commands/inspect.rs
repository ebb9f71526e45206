//! Inspect command - report the state of a dataset file

use super::{blocking, payload_size, select};
use crate::cli::args::{InspectArgs, OutputFormat};
use crate::config::Config;
use crate::dag::{format_bytes, inspect, Inspection, Outcome, MAGIC_SIZE};
use crate::error::{DagError, DagResult};
use console::style;

/// Execute the inspect command
pub async fn execute(args: InspectArgs, config: &Config) -> DagResult<()> {
    let (dir, identity) = select(&args.identity, config);
    let path = identity.path_in(&dir)?;
    let expected = payload_size(args.size, args.epoch)?;

    if !path.is_file() {
        return Err(DagError::User(format!("No dataset at {}", path.display())));
    }

    let report = blocking(move || inspect(&path, expected)).await?;

    match args.format {
        OutputFormat::Table => print_report(&report, expected),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Plain => match report.outcome {
            Some(outcome) => println!("{}", outcome),
            None => println!("{}", if report.sealed { "sealed" } else { "unsealed" }),
        },
    }

    Ok(())
}

fn print_report(report: &Inspection, expected: Option<u64>) {
    println!("Dataset: {}", report.path.display());
    println!(
        "  length:  {} ({} bytes, payload {})",
        format_bytes(report.length),
        report.length,
        report.length.saturating_sub(MAGIC_SIZE)
    );

    let sealed = if report.sealed {
        style("sealed").green()
    } else {
        style("unsealed").yellow()
    };
    println!("  header:  {}", sealed);

    if let (Some(outcome), Some(size)) = (report.outcome, expected) {
        let verdict = match outcome {
            Outcome::Match => style(outcome.to_string()).green(),
            _ => style(outcome.to_string()).red(),
        };
        println!("  expect:  {} payload bytes -> {}", size, verdict);
    }
}
