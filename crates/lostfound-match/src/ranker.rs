use std::cmp::Ordering;

use lostfound_core::config::MatchSettings;
use lostfound_core::traits::MatchEngine;
use lostfound_core::types::{ItemRecord, MatchCandidate};

use crate::similarity::SimilarityEngine;

/// Weighted combination of the similarity sub-scores.
///
/// `total = name * w_name + desc * w_desc + color * w_color + bonus`, where
/// `bonus` applies when both reports share a category. A name score at or
/// above the synonym trigger lifts the total to at least the synonym floor.
/// Category is a bonus rather than a filter so that miscategorized reports
/// can still surface.
#[derive(Debug, Clone, Default)]
pub struct MatchRanker {
    engine: SimilarityEngine,
    settings: MatchSettings,
}

impl MatchRanker {
    pub fn new(engine: SimilarityEngine, settings: MatchSettings) -> Self {
        Self { engine, settings }
    }

    pub fn with_settings(settings: MatchSettings) -> Self {
        Self::new(SimilarityEngine::default(), settings)
    }

    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    /// Scores one pair without applying the threshold.
    pub fn score<'a>(&self, new_item: &ItemRecord, candidate: &'a ItemRecord) -> MatchCandidate<'a> {
        let s = &self.settings;
        let category_match = new_item.category() == candidate.category();
        let category_bonus = if category_match { s.category_bonus } else { 0.0 };

        let name_score = self.engine.name_score(new_item.name(), candidate.name());
        let color_score = self.engine.color_score(new_item.color(), candidate.color());
        let desc_score = self.engine.description_score(new_item.description(), candidate.description());

        let mut total = name_score * s.name_weight
            + desc_score * s.desc_weight
            + color_score * s.color_weight
            + category_bonus;
        if name_score >= s.synonym_floor_trigger {
            total = total.max(s.synonym_floor);
        }

        MatchCandidate {
            record: candidate,
            score: total.clamp(0.0, 1.0),
            name_score,
            desc_score,
            color_score,
            category_match,
        }
    }
}

impl MatchEngine for MatchRanker {
    /// Candidates of the same kind as `new_item`, or with its id, are
    /// skipped. Survivors are sorted by score, highest first, keeping input
    /// order between equal scores.
    fn find_matches<'a>(
        &self,
        new_item: &ItemRecord,
        candidates: &'a [ItemRecord],
    ) -> Vec<MatchCandidate<'a>> {
        let wanted = new_item.kind().opposite();
        let mut matches: Vec<MatchCandidate<'a>> = candidates
            .iter()
            .filter(|candidate| {
                let comparable = candidate.kind() == wanted && candidate.id() != new_item.id();
                if !comparable {
                    tracing::debug!(id = candidate.id(), "skipping candidate that is not of the opposite kind");
                }
                comparable
            })
            .map(|candidate| self.score(new_item, candidate))
            .filter(|m| m.score >= self.settings.threshold)
            .collect();
        matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        tracing::debug!(
            item = new_item.id(),
            candidates = candidates.len(),
            matches = matches.len(),
            "ranked match candidates"
        );
        matches
    }
}
