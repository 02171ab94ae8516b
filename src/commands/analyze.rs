//! `solace analyze` command - run a concern through the analysis service
//!
//! Before the network round-trip the command surfaces up to three similar
//! prior entries, so the user can revisit old ground instead of re-treading
//! it. The result is rendered and saved unless `--no-save` is given.

use std::time::Instant;

use chrono::Utc;
use tracing::debug;

use crate::cli::{Cli, OutputFormat};
use crate::commands::helpers::resolve_input;
use solace_core::client::AnalysisClient;
use solace_core::error::Result;
use solace_core::export;
use solace_core::id::generate_id;
use solace_core::record::{effective_tags, AnalysisRecord};
use solace_core::store::Store;

/// Execute the analyze command
#[allow(clippy::too_many_arguments)]
pub fn execute(
    cli: &Cli,
    store: &Store,
    text: Option<&str>,
    stdin: bool,
    with_rebuttals: bool,
    tags: &[String],
    no_save: bool,
    summary: Option<&str>,
) -> Result<()> {
    let content = resolve_input(text, stdin, "concern")?;
    debug!(
        content_len = content.len(),
        with_rebuttals,
        tags_count = tags.len(),
        "analyze_params"
    );

    // Surface related history before the network round-trip
    let similar = store.suggest_similar(&content)?;
    if cli.format == OutputFormat::Human && !cli.quiet && !similar.is_empty() {
        println!("You've worked through similar concerns before:");
        for (record, score) in &similar {
            println!("  {:.2}  {}  {}", score, record.id, record.summary);
        }
        println!();
    }

    let client = AnalysisClient::from_config(&store.config().api)?;
    let start = Instant::now();
    let mut response = client.analyze(&content, with_rebuttals)?;
    debug!(elapsed = ?start.elapsed(), "analysis_request");

    if let Some(summary) = summary {
        response.summary = Some(summary.to_string());
    }

    if no_save {
        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "saved": false,
                    "response": response,
                    "similar": similar_entries(&similar),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Human => {
                // Render through a transient record so the output matches
                // what a saved entry would look like
                let now = Utc::now();
                let tags = effective_tags(tags, &response);
                let summary = response.summary_or_untitled();
                let record = AnalysisRecord {
                    id: generate_id(store.config().id_scheme),
                    content,
                    summary,
                    response,
                    tags,
                    favorite: false,
                    last_viewed: now,
                    created_at: now,
                    updated_at: now,
                };
                print!("{}", export::render_markdown(&record));
                if !cli.quiet {
                    println!();
                    println!("Not saved (--no-save).");
                }
            }
        }
        return Ok(());
    }

    let record = store.save_analysis(&content, response, tags, None)?;
    debug!(record_id = %record.id, "save_analysis");

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "saved": true,
                "record": record,
                "similar": similar_entries(&similar),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            print!("{}", export::render_markdown(&record));
            if !cli.quiet {
                println!();
                println!("Saved as {}", record.id);
            }
        }
    }

    Ok(())
}

fn similar_entries(similar: &[(AnalysisRecord, f64)]) -> Vec<serde_json::Value> {
    similar
        .iter()
        .map(|(record, score)| {
            serde_json::json!({
                "id": record.id,
                "summary": record.summary,
                "score": score,
            })
        })
        .collect()
}
