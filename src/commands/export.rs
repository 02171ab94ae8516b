//! `solace export` command - write one analysis as a Markdown artifact

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{Cli, OutputFormat};
use solace_core::error::{Result, SolaceError};
use solace_core::export;
use solace_core::store::Store;

/// Execute the export command
pub fn execute(cli: &Cli, store: &Store, id: &str, output: Option<&Path>) -> Result<()> {
    let record = store.get_analysis(id)?;
    let markdown = export::render_markdown(&record);

    // `-` means stdout; no flag means a generated filename in the cwd
    let target = match output {
        Some(path) if path.as_os_str() == "-" => None,
        Some(path) => Some(path.to_path_buf()),
        None => Some(PathBuf::from(export::artifact_filename(&record))),
    };

    match target {
        None => match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "id": record.id,
                    "markdown": markdown,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Human => {
                print!("{}", markdown);
            }
        },
        Some(path) => {
            fs::write(&path, &markdown)
                .map_err(|e| SolaceError::io_operation("write export artifact", path.display(), e))?;

            match cli.format {
                OutputFormat::Json => {
                    let output = serde_json::json!({
                        "id": record.id,
                        "path": path.display().to_string(),
                    });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                OutputFormat::Human => {
                    if !cli.quiet {
                        println!("Exported {} to {}", record.id, path.display());
                    }
                }
            }
        }
    }

    Ok(())
}
