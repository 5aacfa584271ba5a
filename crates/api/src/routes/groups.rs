//! Group, membership and settlement routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use paymeback_core::settlement::GroupStatus;
use paymeback_db::repositories::{
    CreateGroupInput, GroupError, SettlementRepoError, SettlementRepository,
};
use paymeback_db::{GroupRepository, entities::groups};
use paymeback_shared::AppError;
use paymeback_shared::types::{GroupId, UserId};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::users::UserResponse;
use super::{app_error_response, error_response};
use crate::AppState;

/// Creates the group routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/groups", get(list_groups).post(create_group))
        .route("/groups/{group_id}/members", get(list_members))
        .route("/groups/{group_id}/request-settle", post(request_settle))
        .route("/groups/{group_id}/settlement-status", get(settlement_status))
}

/// Query parameters for listing groups.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListGroupsQuery {
    /// Only groups this user belongs to.
    pub user_id: Option<i64>,
    /// `active` (default) or `settled`.
    pub status: Option<String>,
}

/// Request body for creating a group.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    /// Group name.
    pub name: String,
    /// Initial members.
    #[serde(default)]
    pub member_ids: Vec<i64>,
}

/// Query parameters identifying the acting user.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    /// Acting user ID.
    pub user_id: i64,
}

/// Response for a group.
#[derive(Debug, Serialize)]
pub struct GroupResponse {
    /// Group ID.
    pub id: i64,
    /// Group name.
    pub name: String,
    /// `active` or `settled`.
    pub status: String,
}

impl From<groups::Model> for GroupResponse {
    fn from(group: groups::Model) -> Self {
        Self {
            id: group.id,
            name: group.name,
            status: group.status,
        }
    }
}

/// Parses an optional status filter, defaulting to active.
pub(crate) fn parse_status(raw: Option<&str>) -> Result<GroupStatus, Response> {
    match raw {
        None => Ok(GroupStatus::Active),
        Some(s) => GroupStatus::parse(s).ok_or_else(|| {
            app_error_response(&AppError::Validation(format!(
                "Invalid status '{s}'. Must be one of: active, settled"
            )))
        }),
    }
}

/// GET `/groups` - List groups, optionally for one user.
async fn list_groups(
    State(state): State<AppState>,
    Query(query): Query<ListGroupsQuery>,
) -> impl IntoResponse {
    let status = match parse_status(query.status.as_deref()) {
        Ok(status) => status,
        Err(response) => return response,
    };

    let repo = GroupRepository::new((*state.db).clone());

    match repo.list(query.user_id.map(UserId), status).await {
        Ok(groups) => {
            let response: Vec<GroupResponse> =
                groups.into_iter().map(GroupResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => map_group_error(&e),
    }
}

/// POST `/groups` - Create a group with members.
async fn create_group(
    State(state): State<AppState>,
    Json(payload): Json<CreateGroupRequest>,
) -> impl IntoResponse {
    let repo = GroupRepository::new((*state.db).clone());

    let input = CreateGroupInput {
        name: payload.name,
        member_ids: payload.member_ids.into_iter().map(UserId).collect(),
    };

    match repo.create(input).await {
        Ok(group) => (StatusCode::CREATED, Json(GroupResponse::from(group))).into_response(),
        Err(e) => map_group_error(&e),
    }
}

/// GET `/groups/{group_id}/members` - List members ordered by name.
async fn list_members(
    State(state): State<AppState>,
    Path(group_id): Path<i64>,
) -> impl IntoResponse {
    let repo = GroupRepository::new((*state.db).clone());

    match repo.members(GroupId(group_id)).await {
        Ok(members) => {
            let response: Vec<UserResponse> =
                members.into_iter().map(UserResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => map_group_error(&e),
    }
}

/// POST `/groups/{group_id}/request-settle?userId=` - Approve settling a group.
async fn request_settle(
    State(state): State<AppState>,
    Path(group_id): Path<i64>,
    Query(query): Query<UserQuery>,
) -> impl IntoResponse {
    let repo = SettlementRepository::new((*state.db).clone());

    match repo.request(GroupId(group_id), UserId(query.user_id)).await {
        Ok(outcome) => {
            let approved = outcome.progress.approved_count();
            let total = outcome.progress.total_members;
            let message = if outcome.settled() {
                "Group settled!".to_string()
            } else {
                format!("Approval recorded ({approved}/{total})")
            };

            (
                StatusCode::OK,
                Json(json!({
                    "message": message,
                    "settled": outcome.settled(),
                    "approved": approved,
                    "total": total
                })),
            )
                .into_response()
        }
        Err(e) => map_settlement_error(&e),
    }
}

/// GET `/groups/{group_id}/settlement-status` - Approval progress.
async fn settlement_status(
    State(state): State<AppState>,
    Path(group_id): Path<i64>,
) -> impl IntoResponse {
    let repo = SettlementRepository::new((*state.db).clone());

    let status = match repo.status(GroupId(group_id)).await {
        Ok(status) => status,
        Err(e) => return map_settlement_error(&e),
    };

    let approved_users: Vec<UserResponse> = status
        .approved_users
        .iter()
        .map(|member| UserResponse {
            id: member.id.into_inner(),
            name: member.name.clone(),
        })
        .collect();

    (
        StatusCode::OK,
        Json(json!({
            "status": status.status,
            "approved_count": status.progress.approved_count(),
            "total_members": status.progress.total_members,
            "approved_users": approved_users
        })),
    )
        .into_response()
}

/// Maps group errors to HTTP responses.
fn map_group_error(e: &GroupError) -> Response {
    match e {
        GroupError::NotFound(_) => app_error_response(&AppError::NotFound(e.to_string())),
        GroupError::EmptyName | GroupError::UnknownUser(_) => {
            app_error_response(&AppError::Validation(e.to_string()))
        }
        GroupError::Database(db) => app_error_response(&AppError::Database(db.to_string())),
    }
}

/// Maps settlement errors to HTTP responses.
fn map_settlement_error(e: &SettlementRepoError) -> Response {
    match e {
        SettlementRepoError::GroupNotFound(_) => {
            app_error_response(&AppError::NotFound(e.to_string()))
        }
        SettlementRepoError::Rejected(rejected) => error_response(
            rejected.status_code(),
            rejected.error_code(),
            rejected.to_string(),
        ),
        SettlementRepoError::InvalidStatus(_) => {
            app_error_response(&AppError::Internal(e.to_string()))
        }
        SettlementRepoError::Database(db) => {
            app_error_response(&AppError::Database(db.to_string()))
        }
    }
}
