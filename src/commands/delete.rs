//! `solace delete` command - remove an analysis

use crate::cli::{Cli, OutputFormat};
use solace_core::error::Result;
use solace_core::store::Store;

/// Execute the delete command
pub fn execute(cli: &Cli, store: &Store, id: &str) -> Result<()> {
    store.delete_analysis(id)?;

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": id,
                "deleted": true,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!("Deleted {}", id);
            }
        }
    }

    Ok(())
}
