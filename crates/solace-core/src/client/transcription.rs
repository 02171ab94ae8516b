//! Audio transcription client
//!
//! Posts the audio file to a Whisper-style endpoint as a multipart form
//! (`model` field plus `file` part) and returns the transcribed text. The
//! file part's `Content-Type` comes from the filename; unknown extensions
//! fall back to `application/octet-stream` and let the service decide.

use std::path::Path;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::error::{Result, SolaceError};

use super::{
    env_override, read_body, require_key, user_agent, TRANSCRIPTION_API_KEY_ENV,
    TRANSCRIPTION_ENDPOINT_ENV,
};

const SERVICE: &str = "transcription service";

/// Whisper model requested for transcriptions
const TRANSCRIPTION_MODEL: &str = "whisper-1";

/// Multipart boundary; constant because the body never embeds it
const BOUNDARY: &str = "solace-audio-1b9f4c72";

/// Client for the transcription endpoint
pub struct TranscriptionClient {
    endpoint: String,
    api_key: String,
    timeout: Duration,
    user_agent: String,
}

impl TranscriptionClient {
    /// Build a client from store config plus environment overrides.
    ///
    /// Fails when `SOLACE_TRANSCRIPTION_API_KEY` is unset.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            endpoint: env_override(TRANSCRIPTION_ENDPOINT_ENV)
                .unwrap_or_else(|| config.transcription_endpoint.clone()),
            api_key: require_key(TRANSCRIPTION_API_KEY_ENV)?,
            timeout: Duration::from_secs(config.timeout_secs),
            user_agent: user_agent(),
        })
    }

    /// Transcribe an audio file to text
    #[tracing::instrument(skip(self, path), fields(path = %path.display()))]
    pub fn transcribe(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)
            .map_err(|e| SolaceError::io_operation("read audio file", path.display(), e))?;
        if bytes.is_empty() {
            return Err(SolaceError::invalid_value(
                "audio file",
                format!("{} is empty", path.display()),
            ));
        }

        let mime = mime_guess::from_path(path).first_or_octet_stream();
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.wav");
        let body = multipart_body(filename, mime.essence_str(), &bytes);

        tracing::debug!(
            endpoint = %self.endpoint,
            bytes = bytes.len(),
            mime = %mime,
            "requesting transcription"
        );
        let result = ureq::post(&self.endpoint)
            .set(
                "Content-Type",
                &format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("User-Agent", &self.user_agent)
            .timeout(self.timeout)
            .send_bytes(&body);
        let response = read_body(result, SERVICE)?;

        let value: serde_json::Value = serde_json::from_str(&response)
            .map_err(|e| SolaceError::Api(format!("{} returned malformed JSON: {}", SERVICE, e)))?;
        let text = value["text"].as_str().unwrap_or_default().trim().to_string();
        if text.is_empty() {
            return Err(SolaceError::Api(format!("{} returned no text", SERVICE)));
        }
        Ok(text)
    }
}

/// Two-part form body: the model field, then the audio file
fn multipart_body(filename: &str, content_type: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(bytes.len() + 512);
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"model\"\r\n\r\n");
    body.extend_from_slice(TRANSCRIPTION_MODEL.as_bytes());
    body.extend_from_slice(format!("\r\n--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}
