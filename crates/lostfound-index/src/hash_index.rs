//! Chained hash table keyed by case-insensitive strings.
//!
//! The bucket digest is the position-weighted sum of the lower-cased key's
//! UTF-16 code units modulo the table size, so bucket assignment is
//! reproducible for identical keys and table sizes. Growth doubles the table
//! once `count / table_size` exceeds the configured load factor.

use serde::Serialize;

use lostfound_core::config::IndexSettings;

pub const DEFAULT_TABLE_SIZE: usize = 50;
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.75;

/// A key as inserted, its case-folded form, and the stored value.
#[derive(Debug, Clone)]
pub struct IndexEntry<V> {
    key: String,
    folded: String,
    value: V,
}

impl<V> IndexEntry<V> {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndexStats {
    pub table_size: usize,
    pub count: usize,
    pub load_factor: f64,
    pub max_chain_length: usize,
    pub empty_buckets: usize,
    pub utilization_percent: f64,
}

#[derive(Debug, Clone)]
pub struct HashIndex<V> {
    buckets: Vec<Vec<IndexEntry<V>>>,
    count: usize,
    max_load_factor: f64,
}

impl<V> Default for HashIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> HashIndex<V> {
    pub fn new() -> Self {
        Self::with_size(DEFAULT_TABLE_SIZE)
    }

    /// A zero size is bumped to one bucket.
    pub fn with_size(size: usize) -> Self {
        Self::with_settings(&IndexSettings { initial_size: size, max_load_factor: DEFAULT_MAX_LOAD_FACTOR })
    }

    pub fn with_settings(settings: &IndexSettings) -> Self {
        let size = settings.initial_size.max(1);
        Self { buckets: empty_buckets(size), count: 0, max_load_factor: settings.max_load_factor }
    }

    /// Bucket the key lands in under the current table size.
    pub fn bucket_of(&self, key: &str) -> usize {
        bucket_for(key, self.table_size())
    }

    /// Inserts `key`, replacing the value of an existing case-insensitive
    /// match instead of adding a second entry.
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        let folded = key.to_lowercase();
        let index = bucket_for_folded(&folded, self.table_size());
        let bucket = &mut self.buckets[index];
        if let Some(entry) = bucket.iter_mut().find(|e| e.folded == folded) {
            entry.value = value;
            return;
        }
        bucket.push(IndexEntry { key, folded, value });
        self.count += 1;

        if self.load_factor() > self.max_load_factor {
            self.resize();
        }
    }

    /// Doubles the table and rehashes every entry under the new size.
    pub fn resize(&mut self) {
        let new_size = self.table_size() * 2;
        let old = std::mem::replace(&mut self.buckets, empty_buckets(new_size));
        for entry in old.into_iter().flatten() {
            let index = bucket_for_folded(&entry.folded, new_size);
            self.buckets[index].push(entry);
        }
        tracing::debug!(table_size = new_size, count = self.count, "hash index resized");
    }

    pub fn search(&self, key: &str) -> Option<&V> {
        let folded = key.to_lowercase();
        self.buckets[bucket_for_folded(&folded, self.table_size())]
            .iter()
            .find(|e| e.folded == folded)
            .map(|e| &e.value)
    }

    pub fn search_mut(&mut self, key: &str) -> Option<&mut V> {
        let folded = key.to_lowercase();
        let index = bucket_for_folded(&folded, self.table_size());
        self.buckets[index]
            .iter_mut()
            .find(|e| e.folded == folded)
            .map(|e| &mut e.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.search(key).is_some()
    }

    /// Values of every key containing `fragment`, case-insensitively, in
    /// bucket order. O(n) over all entries.
    pub fn search_partial(&self, fragment: &str) -> Vec<&V> {
        let needle = fragment.to_lowercase();
        self.entries().filter(|e| e.folded.contains(&needle)).map(|e| &e.value).collect()
    }

    pub fn delete(&mut self, key: &str) -> bool {
        let folded = key.to_lowercase();
        let index = bucket_for_folded(&folded, self.table_size());
        let bucket = &mut self.buckets[index];
        match bucket.iter().position(|e| e.folded == folded) {
            Some(pos) => {
                bucket.remove(pos);
                self.count -= 1;
                true
            }
            None => false,
        }
    }

    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.table_size() as f64
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn table_size(&self) -> usize {
        self.buckets.len()
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry<V>> {
        self.buckets.iter().flatten()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.entries().map(IndexEntry::key).collect()
    }

    pub fn values(&self) -> Vec<&V> {
        self.entries().map(IndexEntry::value).collect()
    }

    /// Drops every entry but keeps the current table size.
    pub fn clear(&mut self) {
        self.buckets = empty_buckets(self.table_size());
        self.count = 0;
    }

    pub fn stats(&self) -> IndexStats {
        let table_size = self.table_size();
        let max_chain_length = self.buckets.iter().map(Vec::len).max().unwrap_or(0);
        let empty_buckets = self.buckets.iter().filter(|b| b.is_empty()).count();
        IndexStats {
            table_size,
            count: self.count,
            load_factor: self.load_factor(),
            max_chain_length,
            empty_buckets,
            utilization_percent: (table_size - empty_buckets) as f64 / table_size as f64 * 100.0,
        }
    }
}

/// `sum(code_unit(c_i) * (i + 1)) mod table_size` over the lower-cased key.
pub fn bucket_for(key: &str, table_size: usize) -> usize {
    bucket_for_folded(&key.to_lowercase(), table_size)
}

fn bucket_for_folded(folded: &str, table_size: usize) -> usize {
    let size = table_size as u64;
    let mut hash = 0u64;
    for (i, unit) in folded.encode_utf16().enumerate() {
        hash = (hash + u64::from(unit) * (i as u64 + 1)) % size;
    }
    hash as usize
}

fn empty_buckets<V>(size: usize) -> Vec<Vec<IndexEntry<V>>> {
    std::iter::repeat_with(Vec::new).take(size).collect()
}
