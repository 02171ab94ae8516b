//! `solace list` command - list saved analyses
//!
//! `--favorites` and `--recent` pick the base listing; `--tag` filters may
//! be combined with either. Plain listings page in the database, filtered
//! listings page in memory after the filter is applied.

use crate::cli::{Cli, OutputFormat};
use solace_core::error::Result;
use solace_core::record::AnalysisRecord;
use solace_core::store::Store;

/// Cut for `--recent` when no `--limit` is given
const DEFAULT_RECENT_LIMIT: usize = 10;

/// Execute the list command
pub fn execute(
    cli: &Cli,
    store: &Store,
    favorites: bool,
    recent: bool,
    tags: &[String],
    limit: Option<usize>,
    offset: usize,
) -> Result<()> {
    let records = if favorites || recent || !tags.is_empty() {
        let mut records = if favorites {
            store.list_favorites()?
        } else if recent {
            let fetch = offset.saturating_add(limit.unwrap_or(DEFAULT_RECENT_LIMIT));
            store.list_recently_viewed(fetch)?
        } else {
            store.list_by_tags(tags)?
        };

        if !tags.is_empty() {
            records.retain(|record| tags.iter().all(|t| record.tags.iter().any(|rt| rt == t)));
        }

        records
            .into_iter()
            .skip(offset)
            .take(limit.unwrap_or(usize::MAX))
            .collect()
    } else {
        store.list_analyses(limit, offset)?
    };

    match cli.format {
        OutputFormat::Json => {
            let output: Vec<_> = records.iter().map(record_summary).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if records.is_empty() {
                if !cli.quiet {
                    println!("No analyses found");
                }
            } else {
                for record in &records {
                    println!("{}", record_line(record));
                }
            }
        }
    }

    Ok(())
}

/// One-line human rendering: favorite marker, id, severity, summary, tags
fn record_line(record: &AnalysisRecord) -> String {
    let marker = if record.favorite { "*" } else { " " };
    let severity = record.response.severity.round() as i64;
    let tags = if record.tags.is_empty() {
        String::new()
    } else {
        format!("  ({})", record.tags.join(", "))
    };
    format!(
        "{} {} [L{}] {}{}",
        marker, record.id, severity, record.summary, tags
    )
}

/// Listing entry without the content and response bodies
fn record_summary(record: &AnalysisRecord) -> serde_json::Value {
    serde_json::json!({
        "id": record.id,
        "summary": record.summary,
        "severity": record.response.severity,
        "tags": record.tags,
        "favorite": record.favorite,
        "lastViewed": record.last_viewed,
        "createdAt": record.created_at,
        "updatedAt": record.updated_at,
    })
}
