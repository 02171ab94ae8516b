//! `solace edit` command - update a record's summary or content

use crate::cli::{Cli, OutputFormat};
use solace_core::error::{Result, SolaceError};
use solace_core::store::Store;

/// Execute the edit command
pub fn execute(
    cli: &Cli,
    store: &Store,
    id: &str,
    summary: Option<&str>,
    content: Option<&str>,
) -> Result<()> {
    if summary.is_none() && content.is_none() {
        return Err(SolaceError::UsageError(
            "nothing to edit (pass --summary and/or --content)".to_string(),
        ));
    }

    let mut record = None;
    if let Some(summary) = summary {
        record = Some(store.update_summary(id, summary)?);
    }
    if let Some(content) = content {
        record = Some(store.update_content(id, content)?);
    }
    // Guarded above, so one of the updates ran
    let record = record.ok_or_else(|| SolaceError::Other("edit produced no record".to_string()))?;

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!("Updated {}", record.id);
            }
        }
    }

    Ok(())
}
