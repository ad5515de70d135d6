use crate::types::{ItemId, ItemRecord, MatchCandidate};

/// Keeps a key index consistent with the records held by the store.
///
/// Absence is never an error: lookups return empty vectors.
pub trait ItemIndexer: Send + Sync {
    fn index(&mut self, record: &ItemRecord);
    fn remove(&mut self, record: &ItemRecord) -> usize;
    fn lookup(&self, key: &str) -> Vec<ItemId>;
    fn lookup_partial(&self, fragment: &str) -> Vec<ItemId>;
}

/// Ranks reports of the opposite kind against a new report.
pub trait MatchEngine: Send + Sync {
    fn find_matches<'a>(
        &self,
        new_item: &ItemRecord,
        candidates: &'a [ItemRecord],
    ) -> Vec<MatchCandidate<'a>>;
}
