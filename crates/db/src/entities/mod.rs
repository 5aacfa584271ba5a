//! `SeaORM` entity definitions.

pub mod prelude;

pub mod expense_participants;
pub mod expenses;
pub mod group_members;
pub mod groups;
pub mod settlement_requests;
pub mod users;
