//! Balance queries over a ledger store.

use std::collections::HashMap;
use std::sync::Arc;

use paymeback_shared::SettlementMode;
use paymeback_shared::types::money::round_for_display;
use paymeback_shared::types::{GroupId, UserId};
use rust_decimal::Decimal;

use super::aggregate::CrossGroupAggregator;
use super::calculator::NetBalanceCalculator;
use super::detail::SettlementResolver;
use super::types::{BalanceLine, GroupBalance, NetBalances};
use crate::settlement::types::GroupStatus;
use crate::store::{LedgerStore, StoreError};

/// Computes balances from data read through a [`LedgerStore`].
///
/// Nothing is cached; every call reads a fresh snapshot.
pub struct BalanceService<S: LedgerStore> {
    store: Arc<S>,
    mode: SettlementMode,
}

impl<S: LedgerStore> BalanceService<S> {
    /// Create a new balance service.
    #[must_use]
    pub fn new(store: Arc<S>, mode: SettlementMode) -> Self {
        Self { store, mode }
    }

    /// Net balance of every member of a group.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn group_net_balances(&self, group_id: GroupId) -> Result<NetBalances, StoreError> {
        let snapshot = self.store.group_snapshot(group_id).await?;
        Ok(NetBalanceCalculator::compute(
            snapshot.member_ids(),
            &snapshot.expenses,
        ))
    }

    /// A member's net balance and settlement detail within a group.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn group_balance(
        &self,
        group_id: GroupId,
        user_id: UserId,
    ) -> Result<GroupBalance, StoreError> {
        let snapshot = self.store.group_snapshot(group_id).await?;
        let net = NetBalanceCalculator::compute(snapshot.member_ids(), &snapshot.expenses);
        Ok(SettlementResolver::resolve(
            self.mode,
            user_id,
            &net,
            &snapshot.members,
        ))
    }

    /// One summary line per group, with the given status, where the user is not
    /// settled up.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn user_balance_lines(
        &self,
        user_id: UserId,
        status: GroupStatus,
    ) -> Result<Vec<BalanceLine>, StoreError> {
        let groups = self.store.list_groups_for_user(user_id, status).await?;

        let mut nets: HashMap<GroupId, Decimal> = HashMap::with_capacity(groups.len());
        for group in &groups {
            let net = self.group_net_balances(group.id).await?;
            nets.insert(group.id, round_for_display(net.net_of(user_id)));
        }

        Ok(CrossGroupAggregator::compute_user_balance_lines(
            &groups,
            |id| nets.get(&id).copied().unwrap_or_default(),
        ))
    }
}
