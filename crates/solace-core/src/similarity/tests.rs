use super::*;
use crate::config::RankingConfig;
use crate::record::{AnalysisRecord, AnalysisResponse, CbtAnalysis};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_normalize_lowercases_and_strips_punctuation() {
    assert_eq!(normalize("Hello, World!"), "hello world");
    assert_eq!(normalize("  spaced   out\ttext \n"), "spaced out text");
    assert_eq!(normalize("C'est déjà l'été"), "c est deja l ete");
    assert_eq!(normalize("résumé-building 101"), "resume building 101");
    assert_eq!(normalize(""), "");
    assert_eq!(normalize("!!!"), "");
}

#[test]
fn test_word_similarity_jaccard() {
    // {the, cat, sat} vs {the, cat}: intersection 2, union 3
    assert!(approx(word_similarity("the cat sat", "The cat!"), 2.0 / 3.0));
    assert!(approx(word_similarity("abc", "xyz"), 0.0));
    // duplicates collapse before comparison
    assert!(approx(word_similarity("go go go", "go"), 1.0));
}

#[test]
fn test_word_similarity_empty_sets() {
    assert_eq!(word_similarity("", ""), 0.0);
    assert_eq!(word_similarity("...", "!!!"), 0.0);
    assert_eq!(word_similarity("abc", ""), 0.0);
}

#[test]
fn test_levenshtein_known_distances() {
    assert_eq!(levenshtein("kitten", "sitting"), 3);
    assert_eq!(levenshtein("abc", "abc"), 0);
    assert_eq!(levenshtein("", "abc"), 3);
    assert_eq!(levenshtein("abc", ""), 3);
    assert_eq!(levenshtein("flaw", "lawn"), 2);
}

#[test]
fn test_char_similarity_ratio() {
    // one substitution over length four
    assert!(approx(char_similarity("abcd", "abce"), 0.75));
    assert_eq!(char_similarity("", ""), 0.0);
    assert_eq!(char_similarity("abc", ""), 0.0);
}

#[test]
fn test_identity_scores_one() {
    for text in ["interview", "I'm anxious about tomorrow", "Déjà vu"] {
        assert!(
            approx(text_similarity(text, text), 1.0),
            "identity failed for {:?}",
            text
        );
    }
}

#[test]
fn test_symmetry() {
    let pairs = [
        ("job interview tomorrow", "tomorrow's interview"),
        ("sleep trouble", "can't sleep at night"),
        ("", "anything"),
    ];
    for (a, b) in pairs {
        assert_eq!(word_similarity(a, b), word_similarity(b, a));
        assert_eq!(char_similarity(a, b), char_similarity(b, a));
        assert_eq!(text_similarity(a, b), text_similarity(b, a));
    }
}

#[test]
fn test_empty_empty_is_zero() {
    // The documented convention; must not be NaN
    let score = text_similarity("", "");
    assert_eq!(score, 0.0);
    assert!(!score.is_nan());
}

#[test]
fn test_scores_stay_in_unit_range() {
    let texts = ["", "a", "náïve", "the quick brown fox", "!!!", "a b c d e"];
    for a in texts {
        for b in texts {
            let score = text_similarity(a, b);
            assert!(
                (0.0..=1.0).contains(&score) && !score.is_nan(),
                "score {} out of range for {:?} vs {:?}",
                score,
                a,
                b
            );
        }
    }
}

#[test]
fn test_combined_score_blends_components() {
    let a = "alpha beta";
    let b = "alpha gamma";
    // word: 1/3; char: distance 4 over max length 11
    let expected = WORD_WEIGHT * (1.0 / 3.0) + CHAR_WEIGHT * (7.0 / 11.0);
    assert!(approx(text_similarity(a, b), expected));
}

#[test]
fn test_diacritics_compare_equal_to_ascii() {
    assert!(approx(text_similarity("déjà vu", "deja vu"), 1.0));
}

fn test_record(id: &str, content: &str, summary: &str, tags: &[&str]) -> AnalysisRecord {
    let now = chrono::Utc::now();
    AnalysisRecord {
        id: id.to_string(),
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
fn test_suggest_requires_minimum_draft_length() {
    let records = vec![test_record("sol-1", "anxious about work", "Work", &[])];
    let ranking = RankingConfig::default();
    assert!(suggest_similar("ab", &records, &ranking).is_empty());
    assert!(suggest_similar("  a  ", &records, &ranking).is_empty());
    assert!(!suggest_similar("anxious about work", &records, &ranking).is_empty());
}

#[test]
fn test_suggest_filters_below_threshold() {
    let records = vec![test_record(
        "sol-1",
        "completely unrelated topic entirely",
        "Unrelated",
        &[],
    )];
    let ranking = RankingConfig::default();
    let suggestions = suggest_similar("zzz qqq xxx", &records, &ranking);
    assert!(suggestions.is_empty());
}

#[test]
fn test_suggest_orders_and_truncates() {
    let records = vec![
        test_record("sol-1", "anxious about my job interview", "Interview", &[]),
        test_record("sol-2", "pizza recipe ideas", "Cooking", &[]),
        test_record("sol-3", "job interview next week", "Interview soon", &[]),
        test_record("sol-4", "interview preparation notes", "Prep", &[]),
        test_record("sol-5", "my job interview went badly", "Bad interview", &[]),
    ];
    let ranking = RankingConfig::default();
    let suggestions = suggest_similar("anxious about my job interview", &records, &ranking);

    assert!(suggestions.len() <= ranking.suggest_limit);
    assert_eq!(suggestions[0].record.id, "sol-1");
    for pair in suggestions.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    assert!(suggestions.iter().all(|s| s.record.id != "sol-2"));
}

#[test]
fn test_suggest_tag_boost() {
    let ranking = RankingConfig::default();
    let without = vec![test_record(
        "sol-1",
        "interview nerves all week",
        "Nerves",
        &[],
    )];
    let with = vec![test_record(
        "sol-1",
        "interview nerves all week",
        "Nerves",
        &["interview"],
    )];

    let score_without = suggest_similar("interview nerves", &without, &ranking)[0].score;
    let score_with = suggest_similar("interview nerves", &with, &ranking)[0].score;
    assert!(score_with > score_without);
}
