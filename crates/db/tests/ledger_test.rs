//! Integration tests for the database-backed ledger store.

mod common;

use std::sync::Arc;

use paymeback_core::balance::{BalanceService, SettlementMode};
use paymeback_core::expense::NewExpense;
use paymeback_core::settlement::GroupStatus;
use paymeback_core::store::LedgerStore;
use paymeback_db::{ExpenseRepository, LedgerRepository, SettlementRepository};
use paymeback_shared::types::{GroupId, UserId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;

async fn record(
    db: &DatabaseConnection,
    group_id: GroupId,
    paid_by: UserId,
    amount: Decimal,
    participants: &[UserId],
) {
    ExpenseRepository::new(db.clone())
        .create(NewExpense {
            group_id,
            paid_by,
            amount,
            description: String::new(),
            participant_ids: participants.to_vec(),
        })
        .await
        .expect("Failed to record expense");
}

#[tokio::test]
async fn test_snapshot_reads_members_and_expenses() {
    let db = common::setup().await;
    let carol = common::user(&db, "Carol").await;
    let alice = common::user(&db, "Alice").await;
    let group = common::group(&db, "Trip", &[carol, alice]).await;
    record(&db, group, alice, dec!(20), &[alice, carol]).await;

    let store = LedgerRepository::new(db.clone());
    let snapshot = store.group_snapshot(group).await.expect("Snapshot failed");

    assert_eq!(snapshot.member_ids(), vec![alice, carol]);
    assert_eq!(snapshot.expenses.len(), 1);
    assert_eq!(snapshot.expenses[0].amount, dec!(20));
    let mut participants = vec![alice, carol];
    participants.sort_unstable();
    assert_eq!(snapshot.expenses[0].participants, participants);

    let members = store.list_members(group).await.expect("Members failed");
    let expenses = store.list_expenses(group).await.expect("Expenses failed");
    assert_eq!(members, snapshot.members);
    assert_eq!(expenses, snapshot.expenses);
}

#[tokio::test]
async fn test_balances_over_database() {
    let db = common::setup().await;
    let alice = common::user(&db, "Alice").await;
    let bob = common::user(&db, "Bob").await;
    let carol = common::user(&db, "Carol").await;
    let trip = common::group(&db, "Trip", &[alice, bob, carol]).await;
    record(&db, trip, alice, dec!(90), &[alice, bob, carol]).await;
    record(&db, trip, bob, dec!(30), &[bob, carol]).await;

    let service = BalanceService::new(
        Arc::new(LedgerRepository::new(db.clone())),
        SettlementMode::Pairwise,
    );

    let balance = service.group_balance(trip, carol).await.expect("Balance failed");
    assert_eq!(balance.net, dec!(-45));
    let detail: Vec<(&str, Decimal)> = balance
        .detail
        .iter()
        .map(|d| (d.counterparty.as_str(), d.amount))
        .collect();
    assert_eq!(detail, vec![("Alice", dec!(-45)), ("Bob", dec!(-15))]);

    let net = service.group_net_balances(trip).await.expect("Net failed");
    assert_eq!(net.total(), Decimal::ZERO);
}

#[tokio::test]
async fn test_user_lines_follow_group_status() {
    let db = common::setup().await;
    let alice = common::user(&db, "Alice").await;
    let bob = common::user(&db, "Bob").await;
    let flat = common::group(&db, "Flat", &[alice, bob]).await;
    let trip = common::group(&db, "Trip", &[alice, bob]).await;
    record(&db, flat, alice, dec!(50), &[alice, bob]).await;
    record(&db, trip, bob, dec!(10), &[alice, bob]).await;

    let settlements = SettlementRepository::new(db.clone());
    settlements.request(flat, alice).await.expect("Request failed");
    settlements.request(flat, bob).await.expect("Request failed");

    let service = BalanceService::new(
        Arc::new(LedgerRepository::new(db.clone())),
        SettlementMode::Pairwise,
    );

    let active = service
        .user_balance_lines(alice, GroupStatus::Active)
        .await
        .expect("Lines failed");
    let settled = service
        .user_balance_lines(alice, GroupStatus::Settled)
        .await
        .expect("Lines failed");

    assert_eq!(active.len(), 1);
    assert_eq!(active[0].group_id, trip);
    assert_eq!(active[0].amount, dec!(-5));
    assert_eq!(active[0].counterparty, "Group Total");
    assert_eq!(settled.len(), 1);
    assert_eq!(settled[0].group_id, flat);
    assert_eq!(settled[0].amount, dec!(25));
}
