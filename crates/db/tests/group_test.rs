//! Integration tests for Group repository.

mod common;

use paymeback_core::settlement::GroupStatus;
use paymeback_db::GroupRepository;
use paymeback_db::repositories::{CreateGroupInput, GroupError};
use paymeback_shared::types::{GroupId, UserId};

#[tokio::test]
async fn test_create_group_with_members() {
    let db = common::setup().await;
    let alice = common::user(&db, "Alice").await;
    let bob = common::user(&db, "Bob").await;
    let repo = GroupRepository::new(db.clone());

    let group = repo
        .create(CreateGroupInput {
            name: "Beach Trip".to_string(),
            member_ids: vec![bob, alice, bob],
        })
        .await
        .expect("Failed to create group");

    assert_eq!(group.name, "Beach Trip");
    assert_eq!(group.status, "active");

    let members = repo
        .members(GroupId(group.id))
        .await
        .expect("Failed to list members");
    let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob"]);
}

#[tokio::test]
async fn test_create_group_rejects_blank_name() {
    let db = common::setup().await;
    let repo = GroupRepository::new(db.clone());

    let result = repo
        .create(CreateGroupInput {
            name: "   ".to_string(),
            member_ids: vec![],
        })
        .await;

    assert!(matches!(result, Err(GroupError::EmptyName)));
}

#[tokio::test]
async fn test_create_group_rejects_unknown_member() {
    let db = common::setup().await;
    let alice = common::user(&db, "Alice").await;
    let repo = GroupRepository::new(db.clone());

    let result = repo
        .create(CreateGroupInput {
            name: "Flat".to_string(),
            member_ids: vec![alice, UserId(999)],
        })
        .await;

    assert!(matches!(result, Err(GroupError::UnknownUser(id)) if id == UserId(999)));
    let groups = repo.list(None, GroupStatus::Active).await.expect("List failed");
    assert!(groups.is_empty(), "failed create must not leave a group behind");
}

#[tokio::test]
async fn test_list_groups_for_user() {
    let db = common::setup().await;
    let alice = common::user(&db, "Alice").await;
    let bob = common::user(&db, "Bob").await;
    common::group(&db, "Zoo Day", &[alice, bob]).await;
    common::group(&db, "Flat", &[alice]).await;
    common::group(&db, "Poker", &[bob]).await;
    let repo = GroupRepository::new(db.clone());

    let alice_groups: Vec<String> = repo
        .list(Some(alice), GroupStatus::Active)
        .await
        .expect("List failed")
        .into_iter()
        .map(|g| g.name)
        .collect();
    let all = repo.list(None, GroupStatus::Active).await.expect("List failed");
    let settled = repo.list(None, GroupStatus::Settled).await.expect("List failed");

    assert_eq!(alice_groups, vec!["Flat", "Zoo Day"]);
    assert_eq!(all.len(), 3);
    assert!(settled.is_empty());
}

#[tokio::test]
async fn test_members_of_missing_group() {
    let db = common::setup().await;
    let repo = GroupRepository::new(db.clone());

    let result = repo.members(GroupId(77)).await;
    assert!(matches!(result, Err(GroupError::NotFound(id)) if id == GroupId(77)));
}
