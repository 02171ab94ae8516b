//! `solace dump` command - write the whole store as one JSON document

use std::fs;
use std::path::Path;

use crate::cli::{Cli, OutputFormat};
use solace_core::dump;
use solace_core::error::{Result, SolaceError};
use solace_core::store::Store;

/// Execute the dump command
pub fn execute(cli: &Cli, store: &Store, output: Option<&Path>) -> Result<()> {
    let document = dump::export_store(store)?;
    let json = document.to_json()?;

    match output {
        Some(path) => {
            fs::write(path, &json)
                .map_err(|e| SolaceError::io_operation("write dump file", path.display(), e))?;

            match cli.format {
                OutputFormat::Json => {
                    let output = serde_json::json!({
                        "path": path.display().to_string(),
                        "records": document.records.len(),
                        "tags": document.tags.len(),
                    });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                OutputFormat::Human => {
                    if !cli.quiet {
                        println!(
                            "Dumped {} records and {} tags to {}",
                            document.records.len(),
                            document.tags.len(),
                            path.display()
                        );
                    }
                }
            }
        }
        None => {
            // The document is already JSON in both formats
            println!("{}", json);
        }
    }

    Ok(())
}
