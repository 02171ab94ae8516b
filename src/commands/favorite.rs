//! `solace favorite` command - toggle the favorite flag

use crate::cli::{Cli, OutputFormat};
use solace_core::error::Result;
use solace_core::store::Store;

/// Execute the favorite command
pub fn execute(cli: &Cli, store: &Store, id: &str) -> Result<()> {
    let favorite = store.toggle_favorite(id)?;

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": id,
                "favorite": favorite,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                if favorite {
                    println!("Favorited {}", id);
                } else {
                    println!("Unfavorited {}", id);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use solace_core::error::SolaceError;
    use solace_core::record::{AnalysisResponse, CbtAnalysis};
    use tempfile::TempDir;

    fn create_cli() -> Cli {
        Cli {
            root: None,
            store: None,
            format: OutputFormat::Human,
            quiet: true,
            verbose: false,
            log_level: None,
            log_json: false,
            command: None,
        }
    }

    fn response() -> AnalysisResponse {
        AnalysisResponse {
            severity: 2.0,
            summary: Some("Work worry".to_string()),
            explanation: "Your reaction is understandable.".to_string(),
            explanations: vec![],
            cbt_analysis: CbtAnalysis {
                thought_patterns: vec![],
                coping_strategies: vec![],
            },
            rebuttals: None,
        }
    }

    #[test]
    fn test_favorite_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::init(temp_dir.path()).unwrap();
        let record = store
            .save_analysis("worried about work", response(), &[], None)
            .unwrap();

        let cli = create_cli();
        execute(&cli, &store, &record.id).unwrap();
        assert!(store.get_analysis(&record.id).unwrap().favorite);

        execute(&cli, &store, &record.id).unwrap();
        assert!(!store.get_analysis(&record.id).unwrap().favorite);
    }

    #[test]
    fn test_favorite_missing_record() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::init(temp_dir.path()).unwrap();

        let cli = create_cli();
        let err = execute(&cli, &store, "sol-missing").unwrap_err();
        assert!(matches!(err, SolaceError::RecordNotFound { .. }));
    }
}
