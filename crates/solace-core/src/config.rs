//! Store configuration
//!
//! Each journal store carries a `config.toml` at its root. Unknown fields are
//! tolerated and every field has a default, so configs written by newer
//! versions still load.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SolaceError};
use crate::id::IdScheme;
use crate::similarity::{self, suggest};
use crate::{search, tag};

/// Current store format version
pub const STORE_FORMAT_VERSION: u32 = 1;

/// Store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store format version for compatibility checking
    #[serde(default = "default_version")]
    pub version: u32,

    /// ID generation scheme
    #[serde(default)]
    pub id_scheme: IdScheme,

    /// Color assigned to tags created implicitly by a save
    #[serde(default = "default_tag_color")]
    pub default_tag_color: String,

    /// Ranking weights and thresholds for search and suggestions
    #[serde(default)]
    pub ranking: RankingConfig,

    /// Analysis and transcription service endpoints
    #[serde(default)]
    pub api: ApiConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            id_scheme: IdScheme::default(),
            default_tag_color: default_tag_color(),
            ranking: RankingConfig::default(),
            api: ApiConfig::default(),
        }
    }
}

/// Ranking parameters for the similarity engine.
///
/// The defaults are load-bearing: changing them changes which past entries
/// surface for a given draft, so treat tuning as a behavior change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Weight of word-set (Jaccard) similarity in the combined score
    #[serde(default = "default_word_weight")]
    pub word_weight: f64,

    /// Weight of character-level (edit distance) similarity in the combined score
    #[serde(default = "default_char_weight")]
    pub char_weight: f64,

    /// Suggestion score weight for the record's content
    #[serde(default = "default_suggest_content_weight")]
    pub suggest_content_weight: f64,

    /// Suggestion score weight for the record's summary
    #[serde(default = "default_suggest_summary_weight")]
    pub suggest_summary_weight: f64,

    /// Suggestion score weight for each of the record's tags
    #[serde(default = "default_suggest_tag_weight")]
    pub suggest_tag_weight: f64,

    /// Minimum combined score for a record to be suggested
    #[serde(default = "default_suggest_threshold")]
    pub suggest_threshold: f64,

    /// Maximum number of suggestions returned
    #[serde(default = "default_suggest_limit")]
    pub suggest_limit: usize,

    /// Minimum trimmed draft length before suggestions are computed
    #[serde(default = "default_suggest_min_chars")]
    pub suggest_min_chars: usize,

    /// Search match threshold against record content
    #[serde(default = "default_search_content_threshold")]
    pub search_content_threshold: f64,

    /// Search match threshold against record summaries
    #[serde(default = "default_search_summary_threshold")]
    pub search_summary_threshold: f64,

    /// Search match threshold against individual tags
    #[serde(default = "default_search_tag_threshold")]
    pub search_tag_threshold: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            word_weight: default_word_weight(),
            char_weight: default_char_weight(),
            suggest_content_weight: default_suggest_content_weight(),
            suggest_summary_weight: default_suggest_summary_weight(),
            suggest_tag_weight: default_suggest_tag_weight(),
            suggest_threshold: default_suggest_threshold(),
            suggest_limit: default_suggest_limit(),
            suggest_min_chars: default_suggest_min_chars(),
            search_content_threshold: default_search_content_threshold(),
            search_summary_threshold: default_search_summary_threshold(),
            search_tag_threshold: default_search_tag_threshold(),
        }
    }
}

/// Service endpoint configuration.
///
/// API keys never live in the config file; they come from `SOLACE_API_KEY`
/// and `SOLACE_TRANSCRIPTION_API_KEY` at call time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Chat-completions endpoint for analysis requests
    #[serde(default = "default_analysis_endpoint")]
    pub analysis_endpoint: String,

    /// Model identifier sent with analysis requests
    #[serde(default = "default_analysis_model")]
    pub analysis_model: String,

    /// Transcription endpoint for audio uploads
    #[serde(default = "default_transcription_endpoint")]
    pub transcription_endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            analysis_endpoint: default_analysis_endpoint(),
            analysis_model: default_analysis_model(),
            transcription_endpoint: default_transcription_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: StoreConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SolaceError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }
}

fn default_version() -> u32 {
    STORE_FORMAT_VERSION
}

fn default_tag_color() -> String {
    tag::DEFAULT_TAG_COLOR.to_string()
}

fn default_word_weight() -> f64 {
    similarity::WORD_WEIGHT
}

fn default_char_weight() -> f64 {
    similarity::CHAR_WEIGHT
}

fn default_suggest_content_weight() -> f64 {
    suggest::CONTENT_WEIGHT
}

fn default_suggest_summary_weight() -> f64 {
    suggest::SUMMARY_WEIGHT
}

fn default_suggest_tag_weight() -> f64 {
    suggest::TAG_WEIGHT
}

fn default_suggest_threshold() -> f64 {
    suggest::SCORE_THRESHOLD
}

fn default_suggest_limit() -> usize {
    suggest::MAX_SUGGESTIONS
}

fn default_suggest_min_chars() -> usize {
    suggest::MIN_DRAFT_CHARS
}

fn default_search_content_threshold() -> f64 {
    search::CONTENT_THRESHOLD
}

fn default_search_summary_threshold() -> f64 {
    search::SUMMARY_THRESHOLD
}

fn default_search_tag_threshold() -> f64 {
    search::TAG_THRESHOLD
}

fn default_analysis_endpoint() -> String {
    "https://openrouter.ai/api/v1/chat/completions".to_string()
}

fn default_analysis_model() -> String {
    "anthropic/claude-3-sonnet".to_string()
}

fn default_transcription_endpoint() -> String {
    "https://api.openai.com/v1/audio/transcriptions".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}
