//! Analysis record model
//!
//! An [`AnalysisRecord`] is one saved journaling session: the user's text,
//! the structured response produced by the analysis service, tags, favorite
//! flag, and timestamps. The response keeps the camelCase field names of the
//! service wire format so persisted JSON, dump files, and live responses all
//! share one shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SolaceError};
use crate::tag;

/// Fallback title when the analysis response carries no summary
pub const UNTITLED_SUMMARY: &str = "Untitled Analysis";

/// Structured output of the analysis service for one concern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    /// Urgency rating, 1-5. May arrive fractional; the derived tag rounds it.
    pub severity: f64,
    /// 3-7 word phrase capturing the core concern
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Compassionate overview paragraph
    pub explanation: String,
    /// Ordered expansion of the overview
    pub explanations: Vec<Section>,
    /// Thought patterns and coping strategies
    pub cbt_analysis: CbtAnalysis,
    /// Evidence-based responses to common worries; present only when
    /// rebuttals were requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rebuttals: Option<Vec<Rebuttal>>,
}

/// One titled paragraph of the expanded explanation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub content: String,
}

/// CBT breakdown of the concern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CbtAnalysis {
    #[serde(default)]
    pub thought_patterns: Vec<ThoughtPattern>,
    #[serde(default)]
    pub coping_strategies: Vec<CopingStrategy>,
}

/// A recognized thought pattern with its impact and a way out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThoughtPattern {
    pub pattern: String,
    pub impact: String,
    pub solution: String,
}

/// A coping strategy with step-by-step instructions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopingStrategy {
    pub strategy: String,
    pub explanation: String,
    pub how_to: String,
}

/// A framed worry and its evidence-based response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rebuttal {
    pub concern: String,
    pub response: String,
}

impl AnalysisResponse {
    /// Structural validation beyond what deserialization enforces.
    ///
    /// Field presence is already guaranteed by serde; this checks the values
    /// a malformed-but-parseable response could still get wrong. Nothing is
    /// persisted until this passes.
    pub fn validate(&self) -> Result<()> {
        if !(1.0..=5.0).contains(&self.severity) {
            return Err(SolaceError::InvalidResponse {
                reason: format!("severity {} outside 1-5", self.severity),
            });
        }
        if self.explanation.is_empty() {
            return Err(SolaceError::InvalidResponse {
                reason: "empty explanation".to_string(),
            });
        }
        Ok(())
    }

    /// Whether rebuttals are present and non-empty
    pub fn has_rebuttals(&self) -> bool {
        self.rebuttals.as_ref().is_some_and(|r| !r.is_empty())
    }

    /// The record title this response implies
    pub fn summary_or_untitled(&self) -> String {
        match &self.summary {
            Some(s) if !s.is_empty() => s.clone(),
            _ => UNTITLED_SUMMARY.to_string(),
        }
    }

    /// Rewrite `||`-separated coping-strategy steps as newline-separated.
    ///
    /// The service emits steps joined by `||` per its prompt contract;
    /// stored records keep the readable form.
    pub fn normalize_steps(&mut self) {
        for strategy in &mut self.cbt_analysis.coping_strategies {
            strategy.how_to = strategy
                .how_to
                .split("||")
                .map(str::trim)
                .collect::<Vec<_>>()
                .join("\n");
        }
    }
}

/// One saved journaling session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    /// Opaque stable identifier, assigned at first save
    pub id: String,
    /// The user's submitted text
    pub content: String,
    /// Short mutable title
    pub summary: String,
    /// Structured service output, persisted verbatim
    pub response: AnalysisResponse,
    /// Tag names, set semantics (sorted, no duplicates)
    pub tags: Vec<String>,
    pub favorite: bool,
    pub last_viewed: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Trim, drop empties, collapse duplicates, sort
pub fn sanitize_tags(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = tags
        .iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out
}

/// The full tag set a save produces: the user's tags plus the derived
/// `Level N` tag and, when rebuttals are present, `What ifs`.
///
/// Reserved names arriving in the input are dropped first; derived
/// membership comes from the response alone, so a save always carries
/// exactly one `Level N` tag and `What ifs` only alongside rebuttals.
pub fn effective_tags(user_tags: &[String], response: &AnalysisResponse) -> Vec<String> {
    let mut tags: Vec<String> = user_tags
        .iter()
        .filter(|t| !tag::is_reserved(t))
        .cloned()
        .collect();
    tags.push(tag::level_tag(response.severity));
    if response.has_rebuttals() {
        tags.push(tag::WHAT_IFS.to_string());
    }
    sanitize_tags(&tags)
}
