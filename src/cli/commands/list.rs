//! List command - show dataset files in the dataset directory

use super::{blocking, dataset_dir};
use crate::cli::args::{ListArgs, OutputFormat};
use crate::config::Config;
use crate::dag::{format_bytes, list, DatasetEntry};
use crate::error::DagResult;
use console::style;

/// Execute the list command
pub async fn execute(args: ListArgs, config: &Config) -> DagResult<()> {
    let dir = dataset_dir(args.dir, config);
    let scan_dir = dir.clone();
    let entries = blocking(move || list(&scan_dir)).await?;

    match args.format {
        OutputFormat::Table => {
            if entries.is_empty() {
                println!("No datasets found in {}", dir.display());
                return Ok(());
            }
            print_table(&entries);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Plain => {
            for entry in &entries {
                println!("{}", entry.path.display());
            }
        }
    }

    Ok(())
}

fn print_table(entries: &[DatasetEntry]) {
    println!(
        "{:<28} {:<9} {:<10} {:<10} {:<17}",
        "NAME", "REVISION", "SIZE", "STATE", "MODIFIED"
    );
    println!("{}", "-".repeat(78));

    for entry in entries {
        let state = if entry.sealed {
            style("sealed").green().to_string()
        } else {
            style("unsealed").yellow().to_string()
        };

        println!(
            "{:<28} {:<9} {:<10} {:<10} {:<17}",
            entry.file_name(),
            entry.revision,
            format_bytes(entry.payload_size()),
            state,
            entry.modified.format("%Y-%m-%d %H:%M").to_string()
        );
    }

    println!();
    println!("Total: {} dataset(s)", entries.len());
}
