use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use lostfound_core::types::{ItemId, ItemKind};

use crate::claim::ClaimId;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Submitted { id: ItemId, kind: ItemKind },
    Removed { id: ItemId },
    Searched { term: String, results: usize },
    ClaimOpened { claim: ClaimId, lost_id: ItemId, found_id: ItemId },
    ClaimApproved { claim: ClaimId, by: ItemKind },
    ClaimRejected { claim: ClaimId, by: ItemKind },
    ItemsClaimed { claim: ClaimId, lost_id: ItemId, found_id: ItemId },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionEntry {
    pub action: Action,
    pub at: DateTime<Utc>,
}

/// Bounded history of board actions. Pushing onto a full log evicts the
/// oldest entry.
#[derive(Debug, Clone)]
pub struct ActionLog {
    entries: VecDeque<ActionEntry>,
    capacity: usize,
}

impl ActionLog {
    /// A zero capacity is bumped to one entry.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { entries: VecDeque::with_capacity(capacity), capacity }
    }

    pub fn push(&mut self, action: Action) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(ActionEntry { action, at: Utc::now() });
    }

    pub fn latest(&self) -> Option<&ActionEntry> {
        self.entries.back()
    }

    /// Up to `n` most recent entries, oldest first.
    pub fn recent(&self, n: usize) -> Vec<&ActionEntry> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
