//! Name, color and description similarity between two reports.
//!
//! Every score is in `[0, 1]`. Names and colors go through the same ladder:
//! exact match, whole-string synonym, any token synonym, then normalized
//! Levenshtein similarity. Descriptions are compared as token sets with
//! synonym-aware partial credit over the size of their union.

use std::collections::BTreeSet;

use crate::thesaurus::{normalize, SynonymThesaurus};

pub const EXACT_SCORE: f64 = 1.0;
pub const NAME_SYNONYM_SCORE: f64 = 0.9;
pub const TOKEN_SYNONYM_SCORE: f64 = 0.85;
pub const SYNONYM_CREDIT: f64 = 0.8;

/// Words that carry no identifying signal in a description.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "at", "in", "on", "with", "and", "or", "of", "to", "for", "from",
    "by", "near", "into", "onto", "under", "over", "about", "but", "nor", "yet", "lost", "found",
    "my", "i",
];

/// Description tokens shorter than this are dropped.
const MIN_TOKEN_LEN: usize = 3;

#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityEngine {
    thesaurus: SynonymThesaurus,
}

impl SimilarityEngine {
    pub fn new(thesaurus: SynonymThesaurus) -> Self {
        Self { thesaurus }
    }

    pub fn name_score(&self, a: &str, b: &str) -> f64 {
        let a = normalize(a);
        let b = normalize(b);
        if a == b {
            return EXACT_SCORE;
        }
        if self.thesaurus.are_synonyms(&a, &b) {
            return NAME_SYNONYM_SCORE;
        }
        let tokens_b: Vec<&str> = b.split_whitespace().collect();
        let token_synonym = a
            .split_whitespace()
            .any(|ta| tokens_b.iter().any(|tb| self.thesaurus.are_synonyms(ta, tb)));
        if token_synonym {
            return TOKEN_SYNONYM_SCORE;
        }
        edit_similarity(&a, &b)
    }

    /// Same ladder as names. "Not specified" is compared literally; callers
    /// that want it treated as blank must blank it themselves.
    pub fn color_score(&self, a: &str, b: &str) -> f64 {
        self.name_score(a, b)
    }

    /// Each token of `a` earns 1.0 when `b` has it verbatim, otherwise 0.8
    /// for every synonym token in `b`. Credit is divided by the union size
    /// and capped at 1. Empty token sets score 0.
    pub fn description_score(&self, a: &str, b: &str) -> f64 {
        let tokens_a = description_tokens(a);
        let tokens_b = description_tokens(b);
        if tokens_a.is_empty() || tokens_b.is_empty() {
            return 0.0;
        }

        let mut credit = 0.0;
        for token in &tokens_a {
            if tokens_b.contains(token) {
                credit += EXACT_SCORE;
            } else {
                for other in &tokens_b {
                    if self.thesaurus.are_synonyms(token, other) {
                        credit += SYNONYM_CREDIT;
                    }
                }
            }
        }
        let union = tokens_a.union(&tokens_b).count();
        (credit / union as f64).min(1.0)
    }
}

/// Lower-cased words with punctuation stripped, at least three characters
/// long and not a stop word.
pub fn description_tokens(text: &str) -> BTreeSet<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    cleaned
        .split_whitespace()
        .filter(|word| word.chars().count() >= MIN_TOKEN_LEN && !STOP_WORDS.contains(word))
        .map(str::to_string)
        .collect()
}

/// Unit-cost edit distance over characters, compared case-insensitively.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(&a.to_lowercase(), &b.to_lowercase())
}

/// `1 - distance / longest`, clamped to `[0, 1]`; two empty strings are
/// identical.
fn edit_similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return EXACT_SCORE;
    }
    let distance = levenshtein_distance(a, b);
    (1.0 - distance as f64 / longest as f64).clamp(0.0, 1.0)
}
