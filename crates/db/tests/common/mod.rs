//! Shared setup for repository integration tests.

#![allow(dead_code)]

use paymeback_db::migration::{Migrator, MigratorTrait};
use paymeback_db::repositories::CreateGroupInput;
use paymeback_db::{GroupRepository, UserRepository};
use paymeback_shared::config::DatabaseConfig;
use paymeback_shared::types::{GroupId, UserId};
use sea_orm::DatabaseConnection;

/// Connects to a fresh in-memory `SQLite` database and runs migrations.
///
/// A single pooled connection keeps the in-memory database alive.
pub async fn setup() -> DatabaseConnection {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
    };
    let db = paymeback_db::connect(&config)
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None).await.expect("Failed to migrate");
    db
}

/// Creates a user and returns its id.
pub async fn user(db: &DatabaseConnection, name: &str) -> UserId {
    let user = UserRepository::new(db.clone())
        .create(name)
        .await
        .expect("Failed to create user");
    UserId(user.id)
}

/// Creates a group with the given members and returns its id.
pub async fn group(db: &DatabaseConnection, name: &str, members: &[UserId]) -> GroupId {
    let group = GroupRepository::new(db.clone())
        .create(CreateGroupInput {
            name: name.to_string(),
            member_ids: members.to_vec(),
        })
        .await
        .expect("Failed to create group");
    GroupId(group.id)
}
