//! `solace init` command - create a new journal store

use std::path::Path;

use crate::cli::{Cli, OutputFormat};
use solace_core::error::Result;
use solace_core::store::Store;

/// Execute the init command
pub fn execute(cli: &Cli, root: &Path) -> Result<()> {
    let store = if let Some(path) = cli.store.as_ref() {
        let resolved = if path.is_absolute() {
            path.clone()
        } else {
            root.join(path)
        };
        Store::init_at(&resolved)?
    } else {
        Store::init(root)?
    };

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "status": "ok",
                "store": store.root().display().to_string(),
                "message": "Store initialized"
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            println!("Initialized solace store at {}", store.root().display());
            if !cli.quiet {
                println!();
                println!("Run `solace analyze \"<concern>\"` to create your first entry.");
            }
        }
    }

    Ok(())
}
