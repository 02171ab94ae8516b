//! `solace search` command - fuzzy search over saved analyses

use crate::cli::{Cli, OutputFormat};
use solace_core::error::Result;
use solace_core::search::{self, SearchQuery};
use solace_core::store::Store;

/// Characters of matched content shown around each hit
const CONTEXT_LEN: usize = 80;

/// Execute the search command
pub fn execute(cli: &Cli, store: &Store, query: &str, tags: &[String]) -> Result<()> {
    let search_query = SearchQuery::text(query).with_tags(tags.to_vec());
    let results = store.search(&search_query)?;

    match cli.format {
        OutputFormat::Json => {
            let output: Vec<_> = results
                .iter()
                .map(|record| {
                    serde_json::json!({
                        "id": record.id,
                        "summary": record.summary,
                        "severity": record.response.severity,
                        "tags": record.tags,
                        "favorite": record.favorite,
                        "updatedAt": record.updated_at,
                        "context": search::match_context(&record.content, query, CONTEXT_LEN),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if results.is_empty() {
                if !cli.quiet {
                    println!("No matches found");
                }
            } else {
                for record in &results {
                    let severity = record.response.severity.round() as i64;
                    println!("{} [L{}] {}", record.id, severity, record.summary);
                    println!("    {}", search::match_context(&record.content, query, CONTEXT_LEN));
                }
            }
        }
    }

    Ok(())
}
