//! Settlement domain types.

use paymeback_shared::types::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a group.
///
/// The only valid transition is Active → Settled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupStatus {
    /// Expenses are still being tracked.
    #[default]
    Active,
    /// Every member approved settling up (terminal).
    Settled,
}

impl GroupStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Settled => "settled",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "settled" => Some(Self::Settled),
            _ => None,
        }
    }

    /// Returns true if the group no longer accepts settlement requests.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Settled)
    }
}

impl fmt::Display for GroupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Approval progress of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementProgress {
    /// Distinct members who approved, in first-approval order.
    pub approved: Vec<UserId>,
    /// Number of members in the group.
    pub total_members: usize,
}

impl SettlementProgress {
    /// Number of distinct approving members.
    #[must_use]
    pub fn approved_count(&self) -> usize {
        self.approved.len()
    }

    /// Returns true once every member has approved.
    ///
    /// A group without members never reaches quorum.
    #[must_use]
    pub fn has_quorum(&self) -> bool {
        self.total_members > 0 && self.approved_count() == self.total_members
    }
}

/// Result of recording a settlement request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementOutcome {
    /// Status after the request.
    pub new_status: GroupStatus,
    /// Progress including the new approval.
    pub progress: SettlementProgress,
    /// False when the requester had already approved.
    pub newly_recorded: bool,
}

impl SettlementOutcome {
    /// Returns true if this request moved the group to settled.
    #[must_use]
    pub fn settled(&self) -> bool {
        self.new_status == GroupStatus::Settled
    }
}
