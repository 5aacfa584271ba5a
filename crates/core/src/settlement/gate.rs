//! Settlement approval state machine.

use paymeback_shared::types::UserId;

use crate::settlement::error::SettlementError;
use crate::settlement::types::{GroupStatus, SettlementOutcome, SettlementProgress};

/// Stateless gate deciding when a group becomes settled.
///
/// Approvals are stored by the caller; the gate only counts them.
pub struct SettlementGate;

impl SettlementGate {
    /// Summarises approvals for a group.
    ///
    /// Approvals from users who are no longer members are not counted, and repeated
    /// approvals from the same member count once.
    ///
    /// # Arguments
    /// * `members` - Current group members
    /// * `approvals` - Recorded approvals, oldest first
    #[must_use]
    pub fn progress(members: &[UserId], approvals: &[UserId]) -> SettlementProgress {
        let mut approved: Vec<UserId> = Vec::new();
        for user in approvals {
            if members.contains(user) && !approved.contains(user) {
                approved.push(*user);
            }
        }

        SettlementProgress {
            approved,
            total_members: distinct(members),
        }
    }

    /// Records a member's request to settle the group.
    ///
    /// # Arguments
    /// * `status` - Current group status
    /// * `requester` - The user asking to settle
    /// * `members` - Current group members
    /// * `approvals` - Approvals recorded before this request
    ///
    /// # Returns
    /// * `Ok(SettlementOutcome)` with the status the group should move to
    /// * `Err(SettlementError::AlreadySettled)` if the group is settled
    /// * `Err(SettlementError::NotAMember)` if the requester is not a member
    pub fn request(
        status: GroupStatus,
        requester: UserId,
        members: &[UserId],
        approvals: &[UserId],
    ) -> Result<SettlementOutcome, SettlementError> {
        if status.is_terminal() {
            return Err(SettlementError::AlreadySettled);
        }
        if !members.contains(&requester) {
            return Err(SettlementError::NotAMember { user_id: requester });
        }

        let newly_recorded = !approvals.contains(&requester);
        let mut all: Vec<UserId> = approvals.to_vec();
        if newly_recorded {
            all.push(requester);
        }

        let progress = Self::progress(members, &all);
        let new_status = if progress.has_quorum() {
            GroupStatus::Settled
        } else {
            GroupStatus::Active
        };

        Ok(SettlementOutcome {
            new_status,
            progress,
            newly_recorded,
        })
    }
}

fn distinct(ids: &[UserId]) -> usize {
    let mut seen: Vec<UserId> = ids.to_vec();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}
