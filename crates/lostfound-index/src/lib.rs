//! lostfound-index
//!
//! Chained hash index over string keys plus the item-level index that keeps
//! name, category and description-word keys in step with the record store.

pub mod hash_index;
pub mod item_index;

pub use hash_index::{HashIndex, IndexEntry, IndexStats, DEFAULT_TABLE_SIZE};
pub use item_index::{index_keys, ItemIndex};
