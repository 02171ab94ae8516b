//! `solace similar` command - rank saved analyses against a draft

use crate::cli::{Cli, OutputFormat};
use crate::commands::helpers::resolve_input;
use solace_core::error::Result;
use solace_core::store::Store;

/// Execute the similar command
pub fn execute(cli: &Cli, store: &Store, text: Option<&str>, id: Option<&str>) -> Result<()> {
    let suggestions = match id {
        Some(id) => store.suggest_similar_to(id)?,
        None => {
            let draft = resolve_input(text, false, "draft text")?;
            store.suggest_similar(&draft)?
        }
    };

    match cli.format {
        OutputFormat::Json => {
            let output: Vec<_> = suggestions
                .iter()
                .map(|(record, score)| {
                    serde_json::json!({
                        "id": record.id,
                        "summary": record.summary,
                        "severity": record.response.severity,
                        "tags": record.tags,
                        "score": score,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if suggestions.is_empty() {
                if !cli.quiet {
                    println!("No similar entries found");
                }
            } else {
                for (record, score) in &suggestions {
                    let severity = record.response.severity.round() as i64;
                    println!("{:.2}  {} [L{}] {}", score, record.id, severity, record.summary);
                }
            }
        }
    }

    Ok(())
}
