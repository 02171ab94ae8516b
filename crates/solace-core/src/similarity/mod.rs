//! Similarity engine for relating journal entries
//!
//! Pure functions, no I/O, freely reentrant. The combined score blends
//! word-set overlap (which catches shared vocabulary) with edit-distance
//! similarity (which catches typos and partial matches). Both operate on
//! normalized text: lowercased, Latin diacritics folded to their base
//! letters, everything outside `[a-z0-9 ]` collapsed to single spaces.
//!
//! Zero-length convention: when both normalized inputs are empty, the word
//! and character components are each defined as 0.0, so
//! `text_similarity("", "") == 0.0`. Scores never produce NaN.

mod fold;
pub mod suggest;

pub use suggest::{suggest_similar, Suggestion};

use std::collections::HashSet;

/// Weight of word-set similarity in the combined score
pub const WORD_WEIGHT: f64 = 0.7;
/// Weight of character-level similarity in the combined score
pub const CHAR_WEIGHT: f64 = 0.3;

/// Normalize text for comparison.
///
/// Lowercases, folds Latin-1 and Latin Extended-A diacritics onto their base
/// letters, drops combining marks (U+0300-U+036F), replaces every other
/// character outside `[a-z0-9]` with a space, collapses whitespace runs, and
/// trims. Characters from scripts outside the folded ranges become spaces.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        fold::push_folded(&mut out, c);
    }

    // Collapse whitespace runs and trim in one pass
    let mut collapsed = String::with_capacity(out.len());
    let mut pending_space = false;
    for c in out.chars() {
        if c.is_whitespace() {
            pending_space = !collapsed.is_empty();
        } else {
            if pending_space {
                collapsed.push(' ');
                pending_space = false;
            }
            collapsed.push(c);
        }
    }
    collapsed
}

fn word_set(normalized: &str) -> HashSet<&str> {
    normalized.split_whitespace().collect()
}

/// Jaccard index over the normalized word sets of two texts.
///
/// 0.0 when both sets are empty.
pub fn word_similarity(a: &str, b: &str) -> f64 {
    word_similarity_normalized(&normalize(a), &normalize(b))
}

fn word_similarity_normalized(norm_a: &str, norm_b: &str) -> f64 {
    let words_a = word_set(norm_a);
    let words_b = word_set(norm_b);

    let union = words_a.union(&words_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = words_a.intersection(&words_b).count();
    intersection as f64 / union as f64
}

/// Standard dynamic-programming edit distance: insertion, deletion, and
/// substitution at unit cost, no transposition, computed over chars.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0usize; b_chars.len() + 1];

    for (i, ca) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let substitution = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j] + substitution)
                .min(prev[j + 1] + 1)
                .min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Edit-distance similarity ratio over the normalized strings.
///
/// `(max_len - distance) / max_len`; 0.0 when both strings normalize to
/// empty.
pub fn char_similarity(a: &str, b: &str) -> f64 {
    char_similarity_normalized(&normalize(a), &normalize(b))
}

fn char_similarity_normalized(norm_a: &str, norm_b: &str) -> f64 {
    let max_len = norm_a.chars().count().max(norm_b.chars().count());
    if max_len == 0 {
        return 0.0;
    }
    let distance = levenshtein(norm_a, norm_b);
    (max_len - distance) as f64 / max_len as f64
}

/// Combined similarity with the standard weights
pub fn text_similarity(a: &str, b: &str) -> f64 {
    weighted_similarity(a, b, WORD_WEIGHT, CHAR_WEIGHT)
}

/// Combined similarity with caller-supplied blend weights
pub fn weighted_similarity(a: &str, b: &str, word_weight: f64, char_weight: f64) -> f64 {
    let norm_a = normalize(a);
    let norm_b = normalize(b);
    word_weight * word_similarity_normalized(&norm_a, &norm_b)
        + char_weight * char_similarity_normalized(&norm_a, &norm_b)
}

#[cfg(test)]
mod tests;
