//! lostfound-match
//!
//! Pairwise similarity between item reports and the ranker that turns those
//! scores into a thresholded, ordered match list.

pub mod ranker;
pub mod similarity;
pub mod thesaurus;

pub use ranker::MatchRanker;
pub use similarity::{description_tokens, levenshtein_distance, SimilarityEngine};
pub use thesaurus::{normalize, SynonymEntry, SynonymThesaurus};
