use lostfound_core::config::IndexSettings;
use lostfound_core::traits::ItemIndexer;
use lostfound_core::types::{ItemId, ItemRecord};

use crate::hash_index::{HashIndex, IndexStats};

/// Description words must be longer than this to become keys.
const MIN_DESCRIPTION_WORD_LEN: usize = 3;

/// Keys a record is filed under: lower-cased name, lower-cased category
/// label, then every description word longer than three characters with
/// punctuation stripped. Duplicates are dropped, first occurrence wins.
pub fn index_keys(record: &ItemRecord) -> Vec<String> {
    let mut keys = Vec::new();
    push_unique(&mut keys, record.name().trim().to_lowercase());
    push_unique(&mut keys, record.category().label().to_lowercase());
    for word in record.description().split_whitespace() {
        let word: String = word
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_')
            .collect::<String>()
            .to_lowercase();
        if word.chars().count() > MIN_DESCRIPTION_WORD_LEN {
            push_unique(&mut keys, word);
        }
    }
    keys
}

fn push_unique(keys: &mut Vec<String>, key: String) {
    if !key.is_empty() && !keys.contains(&key) {
        keys.push(key);
    }
}

/// Posting-list index: every key maps to the ids of the records filed
/// under it, so two wallets can share the key "wallet".
///
/// Holds ids only; resolving them against the store is the caller's job
/// and ids of records removed from the store without a matching `remove`
/// stay put.
#[derive(Debug, Clone, Default)]
pub struct ItemIndex {
    postings: HashIndex<Vec<ItemId>>,
}

impl ItemIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: &IndexSettings) -> Self {
        Self { postings: HashIndex::with_settings(settings) }
    }

    /// Drops a key and its whole posting list.
    pub fn delete_key(&mut self, key: &str) -> bool {
        self.postings.delete(key)
    }

    pub fn key_count(&self) -> usize {
        self.postings.len()
    }

    pub fn stats(&self) -> IndexStats {
        self.postings.stats()
    }
}

impl ItemIndexer for ItemIndex {
    fn index(&mut self, record: &ItemRecord) {
        let id = record.id();
        for key in index_keys(record) {
            match self.postings.search_mut(&key) {
                Some(ids) => {
                    if !ids.iter().any(|existing| existing == id) {
                        ids.push(id.to_string());
                    }
                }
                None => self.postings.insert(key, vec![id.to_string()]),
            }
        }
    }

    /// Returns how many keys the id was removed from.
    fn remove(&mut self, record: &ItemRecord) -> usize {
        let id = record.id();
        let mut touched = 0;
        for key in index_keys(record) {
            let emptied = match self.postings.search_mut(&key) {
                Some(ids) => {
                    let before = ids.len();
                    ids.retain(|existing| existing != id);
                    if ids.len() != before {
                        touched += 1;
                    }
                    ids.is_empty()
                }
                None => false,
            };
            if emptied {
                self.postings.delete(&key);
            }
        }
        tracing::debug!(id, keys = touched, "removed item from index");
        touched
    }

    fn lookup(&self, key: &str) -> Vec<ItemId> {
        self.postings.search(key).cloned().unwrap_or_default()
    }

    fn lookup_partial(&self, fragment: &str) -> Vec<ItemId> {
        self.postings.search_partial(fragment).into_iter().flatten().cloned().collect()
    }
}
