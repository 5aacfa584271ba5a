//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for users, groups, expenses and balances
//! - JSON request and response types
//! - Error-to-response mapping

pub mod routes;

use axum::Router;
use paymeback_shared::SettlementMode;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// How settlement detail is derived for group balances.
    pub settlement_mode: SettlementMode,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
