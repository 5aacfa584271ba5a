//! Property-based tests for `SettlementGate`.

use proptest::prelude::*;

use paymeback_shared::types::UserId;

use crate::settlement::gate::SettlementGate;
use crate::settlement::types::GroupStatus;

fn arb_members() -> impl Strategy<Value = Vec<UserId>> {
    (1_i64..=8).prop_map(|n| (1..=n).map(UserId).collect())
}

/// Members plus a sequence of approval requests drawn from them.
fn arb_requests() -> impl Strategy<Value = (Vec<UserId>, Vec<UserId>)> {
    arb_members().prop_flat_map(|members| {
        let pool = members.clone();
        (
            Just(members),
            prop::collection::vec(prop::sample::select(pool), 0..20),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The group settles exactly when every distinct member has asked.
    #[test]
    fn prop_settles_only_with_every_member((members, requests) in arb_requests()) {
        let mut status = GroupStatus::Active;
        let mut approvals: Vec<UserId> = Vec::new();

        for requester in &requests {
            if status.is_terminal() {
                break;
            }
            let outcome = SettlementGate::request(status, *requester, &members, &approvals)
                .expect("requests come from members");
            if outcome.newly_recorded {
                approvals.push(*requester);
            }
            status = outcome.new_status;
        }

        let everyone = members.iter().all(|m| approvals.contains(m));
        prop_assert_eq!(status == GroupStatus::Settled, everyone);
    }

    /// Approved count never exceeds the member count.
    #[test]
    fn prop_approved_count_bounded((members, requests) in arb_requests()) {
        let progress = SettlementGate::progress(&members, &requests);
        prop_assert!(progress.approved_count() <= progress.total_members);
    }

    /// Once settled, every further request is rejected.
    #[test]
    fn prop_settled_is_terminal((members, requests) in arb_requests()) {
        for requester in &requests {
            prop_assert!(
                SettlementGate::request(GroupStatus::Settled, *requester, &members, &[]).is_err()
            );
        }
    }
}
