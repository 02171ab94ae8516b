//! Fuzzy history search over saved records
//!
//! A record matches a text query when any of its content, summary, or tags
//! is similar enough, or when the query appears as a case-insensitive
//! substring of any of them. Tag filters are ANDed with the text match: the
//! record must carry every selected tag regardless of how well the text
//! scores.

use crate::config::RankingConfig;
use crate::record::AnalysisRecord;
use crate::similarity::weighted_similarity;

/// Similarity threshold against record content
pub const CONTENT_THRESHOLD: f64 = 0.15;
/// Similarity threshold against record summaries
pub const SUMMARY_THRESHOLD: f64 = 0.3;
/// Similarity threshold against individual tags
pub const TAG_THRESHOLD: f64 = 0.8;

/// A history-search request
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    /// Free-text query; `None` or empty filters by tags alone
    pub text: Option<String>,
    /// Tags the record must all carry
    pub tags: Vec<String>,
}

impl SearchQuery {
    pub fn text(query: impl Into<String>) -> Self {
        Self {
            text: Some(query.into()),
            tags: Vec::new(),
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// Whether one record satisfies the query
pub fn matches(record: &AnalysisRecord, query: &SearchQuery, ranking: &RankingConfig) -> bool {
    if !query
        .tags
        .iter()
        .all(|t| record.tags.iter().any(|rt| rt == t))
    {
        return false;
    }

    let Some(text) = query.text.as_deref().filter(|t| !t.is_empty()) else {
        return true;
    };

    let sim = |other: &str| weighted_similarity(text, other, ranking.word_weight, ranking.char_weight);

    if sim(&record.content) > ranking.search_content_threshold {
        return true;
    }
    if sim(&record.summary) > ranking.search_summary_threshold {
        return true;
    }
    if record
        .tags
        .iter()
        .any(|tag| sim(tag) > ranking.search_tag_threshold)
    {
        return true;
    }

    let needle = text.to_lowercase();
    record.content.to_lowercase().contains(&needle)
        || record.summary.to_lowercase().contains(&needle)
        || record
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
}

/// Filter records against the query, preserving their order.
///
/// Callers pass records most-recent first, so results come back in the same
/// presentation order.
pub fn search<'a>(
    records: &'a [AnalysisRecord],
    query: &SearchQuery,
    ranking: &RankingConfig,
) -> Vec<&'a AnalysisRecord> {
    records
        .iter()
        .filter(|record| matches(record, query, ranking))
        .collect()
}

/// A snippet of `text` around the first case-insensitive occurrence of
/// `query`, elided with `...` on clipped sides. Falls back to the leading
/// `context_len` characters when the query does not occur literally.
pub fn match_context(text: &str, query: &str, context_len: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    let leading = || chars.iter().take(context_len).collect::<String>();

    if query.is_empty() {
        return leading();
    }

    // Per-char folding keeps indices aligned with the original text
    let single_lower = |c: char| c.to_lowercase().next().unwrap_or(c);
    let hay: Vec<char> = chars.iter().map(|c| single_lower(*c)).collect();
    let needle: Vec<char> = query.chars().map(single_lower).collect();

    if needle.len() > hay.len() {
        return leading();
    }
    let Some(pos) = hay.windows(needle.len()).position(|w| w == needle.as_slice()) else {
        return leading();
    };

    let start = pos.saturating_sub(context_len / 2);
    let end = (pos + needle.len() + context_len / 2).min(chars.len());

    let mut context: String = chars[start..end].iter().collect();
    if start > 0 {
        context = format!("...{}", context);
    }
    if end < chars.len() {
        context.push_str("...");
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{AnalysisResponse, CbtAnalysis};

    fn record(content: &str, summary: &str, tags: &[&str]) -> AnalysisRecord {
        let now = chrono::Utc::now();
        AnalysisRecord {
            id: "sol-1".to_string(),
            content: content.to_string(),
            summary: summary.to_string(),
            response: AnalysisResponse {
                severity: 2.0,
                summary: Some(summary.to_string()),
                explanation: "An overview.".to_string(),
                explanations: vec![],
                cbt_analysis: CbtAnalysis {
                    thought_patterns: vec![],
                    coping_strategies: vec![],
                },
                rebuttals: None,
            },
            tags: tags.iter().map(|t| t.to_string()).collect(),
            favorite: false,
            last_viewed: now,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_substring_match_on_content() {
        let r = record(
            "I'm anxious about my job interview tomorrow",
            "Job interview anxiety",
            &["Level 2"],
        );
        let ranking = RankingConfig::default();
        assert!(matches(&r, &SearchQuery::text("interview"), &ranking));
        assert!(matches(&r, &SearchQuery::text("INTERVIEW"), &ranking));
        assert!(!matches(&r, &SearchQuery::text("volcano eruption"), &ranking));
    }

    #[test]
    fn test_substring_match_on_tag() {
        let r = record("some content here", "A summary", &["Work stress"]);
        let ranking = RankingConfig::default();
        assert!(matches(&r, &SearchQuery::text("work"), &ranking));
    }

    #[test]
    fn test_fuzzy_match_on_summary() {
        let r = record(
            "a long unrelated body of text about gardens and weather",
            "sleepless nights",
            &[],
        );
        let ranking = RankingConfig::default();
        // close to the summary but not a substring of anything
        assert!(matches(&r, &SearchQuery::text("sleepless night"), &ranking));
    }

    #[test]
    fn test_tag_filter_is_anded() {
        let r = record("interview prep", "Interview", &["Work", "Level 2"]);
        let ranking = RankingConfig::default();

        let q = SearchQuery::text("interview").with_tags(vec!["Work".to_string()]);
        assert!(matches(&r, &q, &ranking));

        let q = SearchQuery::text("interview").with_tags(vec!["Home".to_string()]);
        assert!(!matches(&r, &q, &ranking));

        let q = SearchQuery::text("interview")
            .with_tags(vec!["Work".to_string(), "Level 2".to_string()]);
        assert!(matches(&r, &q, &ranking));
    }

    #[test]
    fn test_empty_query_filters_by_tags_alone() {
        let r = record("anything", "Anything", &["Work"]);
        let ranking = RankingConfig::default();

        let everything = SearchQuery::default();
        assert!(matches(&r, &everything, &ranking));

        let tagged = SearchQuery::default().with_tags(vec!["Work".to_string()]);
        assert!(matches(&r, &tagged, &ranking));

        let missing = SearchQuery::default().with_tags(vec!["Home".to_string()]);
        assert!(!matches(&r, &missing, &ranking));
    }

    #[test]
    fn test_search_preserves_record_order() {
        let records = vec![
            record("interview one", "First", &[]),
            record("interview two", "Second", &[]),
            record("pasta recipe", "Cooking", &[]),
        ];
        let ranking = RankingConfig::default();
        let results = search(&records, &SearchQuery::text("interview"), &ranking);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].summary, "First");
        assert_eq!(results[1].summary, "Second");
    }

    #[test]
    fn test_match_context_snips_around_hit() {
        let text = "the beginning is long and rambling but eventually we reach the interview part and then keep going for a while after";
        let snippet = match_context(text, "interview", 30);
        assert!(snippet.contains("interview"));
        assert!(snippet.starts_with("..."));
        assert!(snippet.ends_with("..."));
        assert!(snippet.len() < text.len());
    }

    #[test]
    fn test_match_context_without_hit_truncates() {
        let text = "a body of text with no match in it at all";
        let snippet = match_context(text, "zzz", 10);
        assert_eq!(snippet, "a body of ");
    }

    #[test]
    fn test_match_context_empty_query() {
        assert_eq!(match_context("abcdef", "", 3), "abc");
    }
}
