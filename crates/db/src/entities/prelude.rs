//! Entity re-exports.

pub use super::expense_participants::Entity as ExpenseParticipants;
pub use super::expenses::Entity as Expenses;
pub use super::group_members::Entity as GroupMembers;
pub use super::groups::Entity as Groups;
pub use super::settlement_requests::Entity as SettlementRequests;
pub use super::users::Entity as Users;
