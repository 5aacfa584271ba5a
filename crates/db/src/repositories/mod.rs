//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod expense;
pub mod group;
pub mod ledger;
pub mod settlement;
pub mod user;

pub use expense::{ExpenseRepoError, ExpenseRepository, ExpenseWithParticipants};
pub use group::{CreateGroupInput, GroupError, GroupRepository};
pub use ledger::LedgerRepository;
pub use settlement::{SettlementRepoError, SettlementRepository, SettlementStatus};
pub use user::UserRepository;
