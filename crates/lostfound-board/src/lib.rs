//! lostfound-board
//!
//! In-memory lost-and-found board: keeps both report collections, keeps the
//! key index in step with them, answers match and search queries and walks
//! claims through their approval steps.

pub mod claim;
pub mod history;

use std::collections::{BTreeMap, HashMap, HashSet};

use lostfound_core::config::{HistorySettings, Settings};
use lostfound_core::error::{Error, Result};
use lostfound_core::traits::{ItemIndexer, MatchEngine};
use lostfound_core::types::{ItemId, ItemKind, ItemRecord, MatchCandidate};
use lostfound_index::{IndexStats, ItemIndex};
use lostfound_match::{MatchRanker, SynonymThesaurus};

pub use claim::{Approval, Claim, ClaimId, ClaimStatus};
pub use history::{Action, ActionEntry, ActionLog};

/// Board with the hash-backed item index and the weighted ranker.
pub type DefaultBoard = LostFoundBoard<ItemIndex, MatchRanker>;

/// Owns the records; the index and matcher only ever see borrows.
///
/// Not internally synchronized. Wrap in a lock if several threads mutate it.
pub struct LostFoundBoard<I, M> where I: ItemIndexer, M: MatchEngine {
    index: I,
    matcher: M,
    thesaurus: SynonymThesaurus,
    lost: Vec<ItemRecord>,
    found: Vec<ItemRecord>,
    // id -> (collection, position in it)
    slots: HashMap<ItemId, (ItemKind, usize)>,
    claims: BTreeMap<ClaimId, Claim>,
    next_claim: ClaimId,
    history: ActionLog,
}

impl DefaultBoard {
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            ItemIndex::with_settings(&settings.index),
            MatchRanker::with_settings(settings.matching),
            SynonymThesaurus::builtin(),
        )
        .with_history_capacity(settings.history.capacity)
    }

    pub fn index_stats(&self) -> IndexStats {
        self.index.stats()
    }
}

impl<I, M> LostFoundBoard<I, M> where I: ItemIndexer, M: MatchEngine {
    pub fn new(index: I, matcher: M, thesaurus: SynonymThesaurus) -> Self {
        Self {
            index,
            matcher,
            thesaurus,
            lost: Vec::new(),
            found: Vec::new(),
            slots: HashMap::new(),
            claims: BTreeMap::new(),
            next_claim: 1,
            history: ActionLog::new(HistorySettings::default().capacity),
        }
    }

    /// Replaces the action log with an empty one of the given capacity.
    #[must_use]
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history = ActionLog::new(capacity);
        self
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    /// Stores and indexes a new report. Ids are never reused.
    pub fn submit(&mut self, record: ItemRecord) -> Result<()> {
        record.validate()?;
        if self.slots.contains_key(record.id()) {
            return Err(Error::DuplicateId(record.id().to_string()));
        }
        self.index.index(&record);
        tracing::info!(id = record.id(), kind = %record.kind(), "item submitted");
        let kind = record.kind();
        let records = match kind {
            ItemKind::Lost => &mut self.lost,
            ItemKind::Found => &mut self.found,
        };
        self.slots.insert(record.id().to_string(), (kind, records.len()));
        self.history.push(Action::Submitted { id: record.id().to_string(), kind });
        records.push(record);
        Ok(())
    }

    pub fn submit_all(&mut self, records: impl IntoIterator<Item = ItemRecord>) -> Result<usize> {
        let mut submitted = 0;
        for record in records {
            self.submit(record)?;
            submitted += 1;
        }
        Ok(submitted)
    }

    pub fn get(&self, id: &str) -> Option<&ItemRecord> {
        let (kind, pos) = self.slots.get(id)?;
        self.collection(*kind).get(*pos)
    }

    /// Reports of one kind in submission order.
    pub fn collection(&self, kind: ItemKind) -> &[ItemRecord] {
        match kind {
            ItemKind::Lost => &self.lost,
            ItemKind::Found => &self.found,
        }
    }

    pub fn lost(&self) -> &[ItemRecord] {
        &self.lost
    }

    pub fn found(&self) -> &[ItemRecord] {
        &self.found
    }

    pub fn len(&self) -> usize {
        self.lost.len() + self.found.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ranked reports of the opposite kind for a stored report.
    pub fn matches_for(&self, id: &str) -> Result<Vec<MatchCandidate<'_>>> {
        let record = self.get(id).ok_or_else(|| Error::NotFound(format!("item '{id}'")))?;
        Ok(self.matcher.find_matches(record, self.collection(record.kind().opposite())))
    }

    /// Ranks stored reports against an unsaved probe.
    pub fn check(&self, probe: &ItemRecord) -> Vec<MatchCandidate<'_>> {
        self.matcher.find_matches(probe, self.collection(probe.kind().opposite()))
    }

    /// Partial key search over the term and each of its synonyms. Records are
    /// returned once, in the order first seen.
    pub fn search(&mut self, term: &str) -> Vec<&ItemRecord> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Vec::new();
        }
        let found = self.search_ids(&term);
        self.history.push(Action::Searched { term: term.clone(), results: found.len() });
        tracing::debug!(term = %term, results = found.len(), "search");
        found.iter().filter_map(|id| self.get(id)).collect()
    }

    fn search_ids(&self, term: &str) -> Vec<ItemId> {
        let mut seen: HashSet<ItemId> = HashSet::new();
        let mut ids = Vec::new();
        for synonym in self.thesaurus.get_synonyms(term) {
            for id in self.index.lookup_partial(&synonym) {
                if self.get(&id).is_none() {
                    tracing::warn!(id = %id, "index refers to an item that is not on the board");
                } else if seen.insert(id.clone()) {
                    ids.push(id);
                }
            }
        }
        ids
    }

    /// Takes a report off the board and out of the index.
    pub fn remove(&mut self, id: &str) -> Option<ItemRecord> {
        let record = self.take(id)?;
        self.history.push(Action::Removed { id: id.to_string() });
        Some(record)
    }

    fn take(&mut self, id: &str) -> Option<ItemRecord> {
        let (kind, pos) = self.slots.remove(id)?;
        let records = match kind {
            ItemKind::Lost => &mut self.lost,
            ItemKind::Found => &mut self.found,
        };
        let record = records.remove(pos);
        for (shifted, r) in records.iter().enumerate().skip(pos) {
            if let Some(slot) = self.slots.get_mut(r.id()) {
                slot.1 = shifted;
            }
        }
        self.index.remove(&record);
        Some(record)
    }

    /// Opens a pending claim pairing a lost report with a found report. The
    /// opening party's approval is recorded.
    pub fn open_claim(&mut self, lost_id: &str, found_id: &str, opened_by: ItemKind) -> Result<ClaimId> {
        self.expect_kind(lost_id, ItemKind::Lost)?;
        self.expect_kind(found_id, ItemKind::Found)?;
        let id = self.next_claim;
        self.next_claim += 1;
        self.claims.insert(id, Claim::open(id, lost_id, found_id, opened_by));
        self.history.push(Action::ClaimOpened {
            claim: id,
            lost_id: lost_id.to_string(),
            found_id: found_id.to_string(),
        });
        tracing::info!(claim = id, lost = lost_id, found = found_id, by = %opened_by, "claim opened");
        Ok(id)
    }

    /// Records `party`'s approval. Once both parties have approved, the pair
    /// leaves the board and the claim is closed as approved.
    pub fn approve(&mut self, claim_id: ClaimId, party: ItemKind) -> Result<Approval> {
        let claim = self.claim(claim_id).ok_or_else(|| Error::NotFound(format!("claim {claim_id}")))?;
        claim.ensure_pending()?;
        let lost_id = claim.lost_id().to_string();
        let found_id = claim.found_id().to_string();
        for id in [&lost_id, &found_id] {
            if self.get(id).is_none() {
                return Err(Error::NotFound(format!("item '{id}' is no longer on the board")));
            }
        }

        let claim = self
            .claims
            .get_mut(&claim_id)
            .ok_or_else(|| Error::NotFound(format!("claim {claim_id}")))?;
        claim.record_approval(party);
        self.history.push(Action::ClaimApproved { claim: claim_id, by: party });
        if !claim.is_approved_by_both() {
            tracing::info!(claim = claim_id, by = %party, "claim waiting for the other party");
            return Ok(Approval::Waiting);
        }
        claim.mark_approved();

        let lost = self.take(&lost_id).ok_or_else(|| Error::NotFound(format!("item '{lost_id}'")))?;
        let found = self.take(&found_id).ok_or_else(|| Error::NotFound(format!("item '{found_id}'")))?;
        self.history.push(Action::ItemsClaimed { claim: claim_id, lost_id, found_id });
        tracing::info!(claim = claim_id, lost = lost.id(), found = found.id(), "claim approved by both parties");
        Ok(Approval::Claimed { lost, found })
    }

    /// Closes a pending claim without touching either report.
    pub fn reject(&mut self, claim_id: ClaimId, party: ItemKind) -> Result<()> {
        let claim = self
            .claims
            .get_mut(&claim_id)
            .ok_or_else(|| Error::NotFound(format!("claim {claim_id}")))?;
        claim.ensure_pending()?;
        claim.mark_rejected(party);
        self.history.push(Action::ClaimRejected { claim: claim_id, by: party });
        tracing::info!(claim = claim_id, by = %party, "claim rejected");
        Ok(())
    }

    pub fn claim(&self, claim_id: ClaimId) -> Option<&Claim> {
        self.claims.get(&claim_id)
    }

    /// Every claim ever opened, oldest first.
    pub fn claims(&self) -> impl Iterator<Item = &Claim> {
        self.claims.values()
    }

    /// Up to `n` most recent actions, oldest first.
    pub fn recent_actions(&self, n: usize) -> Vec<&ActionEntry> {
        self.history.recent(n)
    }

    pub fn history(&self) -> &ActionLog {
        &self.history
    }

    fn expect_kind(&self, id: &str, kind: ItemKind) -> Result<()> {
        let record = self.get(id).ok_or_else(|| Error::NotFound(format!("item '{id}'")))?;
        if record.kind() != kind {
            return Err(Error::InvalidRecord(format!("item '{id}' is not a {kind} report")));
        }
        Ok(())
    }
}
