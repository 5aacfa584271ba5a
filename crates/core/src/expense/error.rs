//! Expense validation errors.

use paymeback_shared::types::UserId;
use thiserror::Error;

/// Reasons an expense is refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExpenseError {
    /// Amount is zero or negative.
    #[error("Amount must be greater than 0")]
    NonPositiveAmount,

    /// Amount rounds to zero cents.
    #[error("Amount must be at least 0.01")]
    AmountBelowMinimumUnit,

    /// Amount does not fit in the stored representation.
    #[error("Amount is too large")]
    AmountOutOfRange,

    /// Participant list is empty.
    #[error("Must have at least one participant")]
    NoParticipants,

    /// Payer is not one of the participants.
    #[error("Payer must be a participant")]
    PayerNotParticipant,

    /// A participant is listed more than once.
    #[error("Participant {0} is listed more than once")]
    DuplicateParticipant(UserId),

    /// A participant is not a member of the group.
    #[error("User {0} is not a member of this group")]
    ParticipantNotMember(UserId),
}

impl ExpenseError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ParticipantNotMember(_) => 422,
            _ => 400,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount | Self::AmountBelowMinimumUnit | Self::AmountOutOfRange => {
                "INVALID_AMOUNT"
            }
            Self::NoParticipants => "NO_PARTICIPANTS",
            Self::PayerNotParticipant => "PAYER_NOT_PARTICIPANT",
            Self::DuplicateParticipant(_) => "DUPLICATE_PARTICIPANT",
            Self::ParticipantNotMember(_) => "PARTICIPANT_NOT_MEMBER",
        }
    }
}
