//! Similar-entry suggestions for a draft in progress

use crate::config::RankingConfig;
use crate::record::AnalysisRecord;

use super::weighted_similarity;

/// Weight of the record's content in the suggestion score
pub const CONTENT_WEIGHT: f64 = 0.6;
/// Weight of the record's summary in the suggestion score
pub const SUMMARY_WEIGHT: f64 = 0.3;
/// Per-tag boost weight in the suggestion score
pub const TAG_WEIGHT: f64 = 0.1;
/// Minimum score for a record to surface as a suggestion
pub const SCORE_THRESHOLD: f64 = 0.1;
/// Maximum number of suggestions
pub const MAX_SUGGESTIONS: usize = 3;
/// Minimum trimmed draft length before suggestions are computed
pub const MIN_DRAFT_CHARS: usize = 3;

/// A past record scored against the current draft
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion<'a> {
    pub record: &'a AnalysisRecord,
    /// Combined suggestion score; always above the configured threshold
    pub score: f64,
}

/// Score every record against the draft and keep the closest few.
///
/// Drafts shorter than the configured minimum produce no suggestions. Ties
/// keep the caller's record order (pass records most-recent first for the
/// usual presentation).
pub fn suggest_similar<'a>(
    draft: &str,
    records: &'a [AnalysisRecord],
    ranking: &RankingConfig,
) -> Vec<Suggestion<'a>> {
    if draft.trim().chars().count() < ranking.suggest_min_chars {
        return Vec::new();
    }

    let mut suggestions: Vec<Suggestion<'a>> = records
        .iter()
        .map(|record| {
            let content_score = similarity(draft, &record.content, ranking);
            let summary_score = similarity(draft, &record.summary, ranking);
            let tag_score: f64 = record
                .tags
                .iter()
                .map(|tag| similarity(draft, tag, ranking) * ranking.suggest_tag_weight)
                .sum();

            let score = content_score * ranking.suggest_content_weight
                + summary_score * ranking.suggest_summary_weight
                + tag_score;

            Suggestion { record, score }
        })
        .filter(|s| s.score > ranking.suggest_threshold)
        .collect();

    suggestions.sort_by(|a, b| b.score.total_cmp(&a.score));
    suggestions.truncate(ranking.suggest_limit);
    suggestions
}

fn similarity(a: &str, b: &str, ranking: &RankingConfig) -> f64 {
    weighted_similarity(a, b, ranking.word_weight, ranking.char_weight)
}
