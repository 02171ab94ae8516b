//! `solace import` command - load a dump file into the store

use std::fs;
use std::path::Path;

use crate::cli::{Cli, OutputFormat};
use solace_core::dump::{self, DumpDocument};
use solace_core::error::{Result, SolaceError};
use solace_core::store::Store;

/// Execute the import command
pub fn execute(cli: &Cli, store: &Store, file: &Path) -> Result<()> {
    let content = fs::read_to_string(file)
        .map_err(|e| SolaceError::io_operation("read dump file", file.display(), e))?;
    let document = DumpDocument::from_json(&content)?;
    let summary = dump::import_document(store, document)?;

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "file": file.display().to_string(),
                "records": summary.records,
                "tags": summary.tags,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!(
                    "Imported {} records and {} tags from {}",
                    summary.records,
                    summary.tags,
                    file.display()
                );
            }
        }
    }

    Ok(())
}
