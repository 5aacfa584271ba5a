//! Settlement error types.

use paymeback_shared::types::UserId;
use thiserror::Error;

/// Errors that can occur while requesting a group settlement.
#[derive(Debug, Error)]
pub enum SettlementError {
    /// The group has already been settled.
    #[error("Group is already settled")]
    AlreadySettled,

    /// Only group members may approve settling.
    #[error("User {user_id} is not a member of this group")]
    NotAMember {
        /// The user who attempted to approve.
        user_id: UserId,
    },
}

impl SettlementError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::AlreadySettled => 409,
            Self::NotAMember { .. } => 403,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadySettled => "GROUP_ALREADY_SETTLED",
            Self::NotAMember { .. } => "NOT_A_MEMBER",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_settled_error() {
        let err = SettlementError::AlreadySettled;
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "GROUP_ALREADY_SETTLED");
    }

    #[test]
    fn test_not_a_member_error() {
        let err = SettlementError::NotAMember { user_id: UserId(7) };
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "NOT_A_MEMBER");
        assert!(err.to_string().contains('7'));
    }
}
