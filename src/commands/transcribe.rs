//! `solace transcribe` command - turn an audio file into text
//!
//! The text goes to stdout so it can be piped straight into
//! `solace analyze --stdin`.

use std::path::Path;
use std::time::Instant;

use tracing::debug;

use crate::cli::{Cli, OutputFormat};
use solace_core::client::TranscriptionClient;
use solace_core::config::ApiConfig;
use solace_core::error::Result;

/// Execute the transcribe command
pub fn execute(cli: &Cli, api: &ApiConfig, file: &Path) -> Result<()> {
    let client = TranscriptionClient::from_config(api)?;
    let start = Instant::now();
    let text = client.transcribe(file)?;
    debug!(text_len = text.len(), elapsed = ?start.elapsed(), "transcription_request");

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "file": file.display().to_string(),
                "text": text,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            println!("{}", text);
        }
    }

    Ok(())
}
