//! `solace show` command - display one analysis
//!
//! Viewing marks the record (last-viewed drives `list --recent`); pass
//! `--no-touch` to read without leaving a trace.

use crate::cli::{Cli, OutputFormat};
use solace_core::error::Result;
use solace_core::export;
use solace_core::store::Store;

/// Execute the show command
pub fn execute(cli: &Cli, store: &Store, id: &str, no_touch: bool) -> Result<()> {
    let record = if no_touch {
        store.get_analysis(id)?
    } else {
        store.view_analysis(id)?
    };

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        OutputFormat::Human => {
            print!("{}", export::render_markdown(&record));
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

    fn create_cli(format: OutputFormat) -> Cli {
        Cli {
            root: None,
            store: None,
            format,
            quiet: false,
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
    fn test_show_touches_last_viewed() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::init(temp_dir.path()).unwrap();
        let record = store
            .save_analysis("worried about work", response(), &[], None)
            .unwrap();

        let cli = create_cli(OutputFormat::Human);
        execute(&cli, &store, &record.id, false).unwrap();

        let after = store.get_analysis(&record.id).unwrap();
        assert!(after.last_viewed >= record.last_viewed);
    }

    #[test]
    fn test_show_no_touch_leaves_last_viewed() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::init(temp_dir.path()).unwrap();
        let record = store
            .save_analysis("worried about work", response(), &[], None)
            .unwrap();

        let cli = create_cli(OutputFormat::Json);
        execute(&cli, &store, &record.id, true).unwrap();

        let after = store.get_analysis(&record.id).unwrap();
        assert_eq!(after.last_viewed, record.last_viewed);
    }

    #[test]
    fn test_show_missing_record() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::init(temp_dir.path()).unwrap();

        let cli = create_cli(OutputFormat::Human);
        let err = execute(&cli, &store, "sol-missing", false).unwrap_err();
        assert!(matches!(err, SolaceError::RecordNotFound { .. }));
    }
}
