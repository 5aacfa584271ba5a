//! Settlement detail for one member of a group.
//!
//! The default [`SettlementMode::Pairwise`] projection pairs the requester with every
//! opposite-signed member independently. Nothing tracks how much of a counterparty's
//! balance other pairings already consumed, so with three or more members the detail
//! magnitudes can add up to more than the requester's net. Clients depend on this
//! shape; [`SettlementMode::Minimal`] is the opt-in alternative.

use paymeback_shared::SettlementMode;
use paymeback_shared::types::UserId;
use paymeback_shared::types::money::{is_negligible, round_for_display};
use rust_decimal::Decimal;

use super::simplify::minimal_transfers;
use super::types::{GroupBalance, Member, NetBalances, SettlementDetail};

/// Stateless resolver turning net balances into a member's settlement detail.
pub struct SettlementResolver;

impl SettlementResolver {
    /// Computes a member's group balance using the given mode.
    ///
    /// # Arguments
    /// * `mode` - Detail derivation strategy
    /// * `requesting` - The member asking for their balance
    /// * `net` - Net balances of the whole group
    /// * `members` - Group members, in the order detail entries should appear
    #[must_use]
    pub fn resolve(
        mode: SettlementMode,
        requesting: UserId,
        net: &NetBalances,
        members: &[Member],
    ) -> GroupBalance {
        match mode {
            SettlementMode::Pairwise => Self::pairwise(requesting, net, members),
            SettlementMode::Minimal => Self::minimal(requesting, net, members),
        }
    }

    /// Independent pairwise projection.
    ///
    /// A requester without a recorded balance has a net of zero and no detail.
    #[must_use]
    pub fn pairwise(requesting: UserId, net: &NetBalances, members: &[Member]) -> GroupBalance {
        let own = net.net_of(requesting);

        let detail = members
            .iter()
            .filter(|member| member.id != requesting)
            .filter_map(|member| {
                let amount = Self::pairwise_amount(own, net.net_of(member.id))?;
                Some(SettlementDetail {
                    counterparty_id: member.id,
                    counterparty: member.name.clone(),
                    amount,
                })
            })
            .collect();

        GroupBalance {
            net: round_for_display(own),
            detail,
        }
    }

    /// Signed amount between a requester with net `own` and a counterparty with net
    /// `other`, or `None` when nothing is owed either way.
    ///
    /// - requester owes, counterparty is owed: `-min(|own|, other)`
    /// - requester is owed, counterparty owes: `min(own, |other|)`
    /// - amounts within the settlement tolerance are suppressed
    #[must_use]
    pub fn pairwise_amount(own: Decimal, other: Decimal) -> Option<Decimal> {
        let signed = if own < Decimal::ZERO && other > Decimal::ZERO {
            -own.abs().min(other)
        } else if own > Decimal::ZERO && other < Decimal::ZERO {
            own.min(other.abs())
        } else {
            return None;
        };

        (!is_negligible(signed)).then_some(signed)
    }

    /// Detail restricted to the requester's transfers in a minimal settlement plan.
    #[must_use]
    pub fn minimal(requesting: UserId, net: &NetBalances, members: &[Member]) -> GroupBalance {
        let order: Vec<UserId> = members.iter().map(|member| member.id).collect();
        let transfers = minimal_transfers(net, &order);

        let detail = members
            .iter()
            .filter(|member| member.id != requesting)
            .filter_map(|member| {
                let amount: Decimal = transfers
                    .iter()
                    .map(|transfer| {
                        if transfer.from == requesting && transfer.to == member.id {
                            -transfer.amount
                        } else if transfer.to == requesting && transfer.from == member.id {
                            transfer.amount
                        } else {
                            Decimal::ZERO
                        }
                    })
                    .sum();

                (!is_negligible(amount)).then(|| SettlementDetail {
                    counterparty_id: member.id,
                    counterparty: member.name.clone(),
                    amount,
                })
            })
            .collect();

        GroupBalance {
            net: round_for_display(net.net_of(requesting)),
            detail,
        }
    }
}
