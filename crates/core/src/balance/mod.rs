//! Balance computation engine.
//!
//! Turns a group's recorded expenses into:
//! - per-member net balances (`calculator`)
//! - the settlement detail for one member (`detail`, `simplify`)
//! - cross-group summary lines for one user (`aggregate`)
//!
//! `service` wires these to a [`LedgerStore`](crate::store::LedgerStore).

pub mod aggregate;
pub mod calculator;
pub mod detail;
pub mod service;
pub mod simplify;
pub mod types;

#[cfg(test)]
mod calculator_props;

pub use aggregate::CrossGroupAggregator;
pub use calculator::NetBalanceCalculator;
pub use detail::SettlementResolver;
pub use paymeback_shared::SettlementMode;
pub use service::BalanceService;
pub use simplify::minimal_transfers;
pub use types::{
    BalanceLine, ExpenseRecord, GROUP_TOTAL_LABEL, GroupBalance, GroupSummary, Member,
    NetBalances, SettlementDetail, Transfer,
};
