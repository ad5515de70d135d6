use lostfound_core::error::{Error, Result};
use lostfound_core::types::{ItemId, ItemKind, ItemRecord};

pub type ClaimId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimStatus {
    Pending,
    Approved,
    Rejected,
}

/// A proposed pairing of a lost report with a found report.
///
/// Parties are named by the side they reported: the owner of the lost item
/// is `ItemKind::Lost`, the finder is `ItemKind::Found`. The party that
/// opens a claim approves it implicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    id: ClaimId,
    lost_id: ItemId,
    found_id: ItemId,
    status: ClaimStatus,
    approved_by: Vec<ItemKind>,
    rejected_by: Option<ItemKind>,
}

impl Claim {
    pub(crate) fn open(id: ClaimId, lost_id: &str, found_id: &str, opened_by: ItemKind) -> Self {
        Self {
            id,
            lost_id: lost_id.to_string(),
            found_id: found_id.to_string(),
            status: ClaimStatus::Pending,
            approved_by: vec![opened_by],
            rejected_by: None,
        }
    }

    pub fn id(&self) -> ClaimId {
        self.id
    }

    pub fn lost_id(&self) -> &str {
        &self.lost_id
    }

    pub fn found_id(&self) -> &str {
        &self.found_id
    }

    pub fn status(&self) -> ClaimStatus {
        self.status
    }

    pub fn approved_by(&self) -> &[ItemKind] {
        &self.approved_by
    }

    pub fn rejected_by(&self) -> Option<ItemKind> {
        self.rejected_by
    }

    pub fn is_approved_by_both(&self) -> bool {
        self.approved_by.contains(&ItemKind::Lost) && self.approved_by.contains(&ItemKind::Found)
    }

    pub(crate) fn ensure_pending(&self) -> Result<()> {
        if self.status != ClaimStatus::Pending {
            return Err(Error::InvalidClaim(format!("claim {} is {:?}", self.id, self.status)));
        }
        Ok(())
    }

    pub(crate) fn record_approval(&mut self, party: ItemKind) {
        if !self.approved_by.contains(&party) {
            self.approved_by.push(party);
        }
    }

    pub(crate) fn mark_approved(&mut self) {
        self.status = ClaimStatus::Approved;
    }

    pub(crate) fn mark_rejected(&mut self, party: ItemKind) {
        self.status = ClaimStatus::Rejected;
        self.rejected_by = Some(party);
    }
}

/// Result of an approval.
#[derive(Debug, Clone, PartialEq)]
pub enum Approval {
    /// The other party has not approved yet.
    Waiting,
    /// Both parties approved; the pair has left the board.
    Claimed { lost: ItemRecord, found: ItemRecord },
}
