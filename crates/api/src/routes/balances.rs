//! Balance routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use paymeback_core::balance::{BalanceLine, BalanceService, GroupBalance};
use paymeback_db::LedgerRepository;
use paymeback_shared::AppError;
use paymeback_shared::types::money::{is_negligible, round_for_display};
use paymeback_shared::types::{GroupId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::app_error_response;
use super::groups::{UserQuery, parse_status};
use crate::AppState;

/// Creates the balance routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/balances/group/{group_id}", get(group_balance))
        .route("/balances/user/{user_id}", get(user_balance))
}

/// Query parameters for the cross-group balance.
#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    /// `active` (default) or `settled`.
    pub status: Option<String>,
}

/// One settlement detail entry.
#[derive(Debug, Serialize)]
pub struct DetailResponse {
    /// Counterparty display name.
    pub counterparty: String,
    /// Negative when the requester owes the counterparty.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// A member's balance within one group.
#[derive(Debug, Serialize)]
pub struct GroupBalanceResponse {
    /// Net balance, positive when owed.
    #[serde(with = "rust_decimal::serde::float")]
    pub net: Decimal,
    /// Settlement detail.
    pub detail: Vec<DetailResponse>,
}

impl From<GroupBalance> for GroupBalanceResponse {
    fn from(balance: GroupBalance) -> Self {
        Self {
            net: balance.net,
            detail: balance
                .detail
                .into_iter()
                .map(|d| DetailResponse {
                    counterparty: d.counterparty,
                    amount: round_for_display(d.amount),
                })
                // Rounding can pull an entry back under the tolerance.
                .filter(|d| !is_negligible(d.amount))
                .collect(),
        }
    }
}

/// One cross-group summary line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceLineResponse {
    /// Group ID.
    pub group_id: i64,
    /// Group name.
    pub group_name: String,
    /// Always `Group Total`.
    pub counterparty: String,
    /// The user's net balance in the group.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl From<BalanceLine> for BalanceLineResponse {
    fn from(line: BalanceLine) -> Self {
        Self {
            group_id: line.group_id.into_inner(),
            group_name: line.group_name,
            counterparty: line.counterparty,
            amount: line.amount,
        }
    }
}

fn balance_service(state: &AppState) -> BalanceService<LedgerRepository> {
    BalanceService::new(
        Arc::new(LedgerRepository::new((*state.db).clone())),
        state.settlement_mode,
    )
}

/// GET `/balances/group/{group_id}?userId=` - A member's balance in a group.
async fn group_balance(
    State(state): State<AppState>,
    Path(group_id): Path<i64>,
    Query(query): Query<UserQuery>,
) -> impl IntoResponse {
    let service = balance_service(&state);

    match service
        .group_balance(GroupId(group_id), UserId(query.user_id))
        .await
    {
        Ok(balance) => (StatusCode::OK, Json(GroupBalanceResponse::from(balance))).into_response(),
        Err(e) => app_error_response(&AppError::Database(e.to_string())),
    }
}

/// GET `/balances/user/{user_id}?status=` - A user's balance across groups.
async fn user_balance(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(query): Query<StatusQuery>,
) -> impl IntoResponse {
    let status = match parse_status(query.status.as_deref()) {
        Ok(status) => status,
        Err(response) => return response,
    };

    let service = balance_service(&state);

    match service.user_balance_lines(UserId(user_id), status).await {
        Ok(lines) => {
            let response: Vec<BalanceLineResponse> =
                lines.into_iter().map(BalanceLineResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => app_error_response(&AppError::Database(e.to_string())),
    }
}
