//! `solace status` command - store location, counts, and versions

use crate::cli::{Cli, OutputFormat};
use solace_core::error::Result;
use solace_core::store::Store;

/// Execute the status command
pub fn execute(cli: &Cli, store: &Store) -> Result<()> {
    let db = store.db();
    let records = db.record_count()?;
    let favorites = db.favorite_count()?;
    let tags = db.tag_count()?;
    let schema = db.schema_version()?;

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "store": store.root().display().to_string(),
                "formatVersion": store.config().version,
                "schemaVersion": schema,
                "records": records,
                "favorites": favorites,
                "tags": tags,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            println!("Store: {}", store.root().display());
            println!("Records: {} ({} favorites)", records, favorites);
            println!("Tags: {}", tags);
            println!("Format version: {}", store.config().version);
            println!("Schema version: {}", schema);
        }
    }

    Ok(())
}
