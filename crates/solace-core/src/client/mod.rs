//! HTTP clients for the external collaborators
//!
//! Two services sit outside the store: the chat-completions endpoint that
//! produces structured analyses and the Whisper-style endpoint that turns
//! audio into text. Both are synchronous, carry bearer auth from the
//! environment, and surface transport, HTTP-status, and payload failures as
//! distinct errors. Neither touches the store; callers persist results
//! only after validation succeeds.

mod analysis;
mod transcription;

pub use analysis::AnalysisClient;
pub use transcription::TranscriptionClient;

use crate::error::{Result, SolaceError};

/// Bearer token for the analysis endpoint
pub const API_KEY_ENV: &str = "SOLACE_API_KEY";
/// Bearer token for the transcription endpoint
pub const TRANSCRIPTION_API_KEY_ENV: &str = "SOLACE_TRANSCRIPTION_API_KEY";
/// Overrides the configured chat-completions URL
pub const ANALYSIS_ENDPOINT_ENV: &str = "SOLACE_ANALYSIS_ENDPOINT";
/// Overrides the configured analysis model
pub const ANALYSIS_MODEL_ENV: &str = "SOLACE_ANALYSIS_MODEL";
/// Overrides the configured transcription URL
pub const TRANSCRIPTION_ENDPOINT_ENV: &str = "SOLACE_TRANSCRIPTION_ENDPOINT";

/// Read a required API key from the environment
fn require_key(var: &str) -> Result<String> {
    std::env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| SolaceError::UsageError(format!("{} is not set", var)))
}

/// Non-empty environment override, if present
fn env_override(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.is_empty())
}

fn user_agent() -> String {
    format!(
        "solace/{} ({})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    )
}

/// Fold a ureq send result into the response body.
///
/// Success statuses yield the body text; HTTP errors carry a short excerpt
/// of the server's reply so auth and quota failures are diagnosable from
/// the error message alone.
fn read_body(
    result: std::result::Result<ureq::Response, ureq::Error>,
    service: &str,
) -> Result<String> {
    match result {
        Ok(res) => {
            let status = res.status();
            if !(200..300).contains(&status) {
                return Err(SolaceError::Api(format!(
                    "{} returned HTTP {}",
                    service, status
                )));
            }
            res.into_string()
                .map_err(|e| SolaceError::Api(format!("{} response unreadable: {}", service, e)))
        }
        Err(ureq::Error::Status(code, res)) => {
            let body = res.into_string().unwrap_or_default();
            let excerpt: String = body.trim().chars().take(200).collect();
            if excerpt.is_empty() {
                Err(SolaceError::Api(format!(
                    "{} returned HTTP {}",
                    service, code
                )))
            } else {
                Err(SolaceError::Api(format!(
                    "{} returned HTTP {}: {}",
                    service, code, excerpt
                )))
            }
        }
        Err(ureq::Error::Transport(e)) => {
            Err(SolaceError::Api(format!("{} unreachable: {}", service, e)))
        }
    }
}
