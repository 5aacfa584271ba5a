//! Validation applied when an expense is recorded.

use paymeback_shared::types::UserId;
use paymeback_shared::types::money::to_cents;
use rust_decimal::Decimal;

use super::error::ExpenseError;
use super::types::{NewExpense, ValidatedExpense};

/// Stateless validator for new expenses.
pub struct ExpenseValidator;

impl ExpenseValidator {
    /// Checks an expense against the group's current members.
    ///
    /// The amount is rounded to the nearest cent.
    ///
    /// # Errors
    ///
    /// Returns the first rule the expense breaks, checking the amount, then the
    /// participant list, then the payer, then membership.
    pub fn validate(
        input: NewExpense,
        members: &[UserId],
    ) -> Result<ValidatedExpense, ExpenseError> {
        let amount_cents = Self::amount_cents(input.amount)?;
        Self::check_participants(input.paid_by, &input.participant_ids)?;

        if let Some(outsider) = input
            .participant_ids
            .iter()
            .find(|id| !members.contains(id))
        {
            return Err(ExpenseError::ParticipantNotMember(*outsider));
        }

        Ok(ValidatedExpense {
            group_id: input.group_id,
            paid_by: input.paid_by,
            amount_cents,
            description: input.description,
            participant_ids: input.participant_ids,
        })
    }

    /// Converts a positive amount to cents.
    ///
    /// # Errors
    ///
    /// Fails for non-positive amounts, amounts under half a cent, and amounts that
    /// overflow an `i64` of cents.
    pub fn amount_cents(amount: Decimal) -> Result<i64, ExpenseError> {
        if amount <= Decimal::ZERO {
            return Err(ExpenseError::NonPositiveAmount);
        }
        match to_cents(amount) {
            None => Err(ExpenseError::AmountOutOfRange),
            Some(0) => Err(ExpenseError::AmountBelowMinimumUnit),
            Some(cents) => Ok(cents),
        }
    }

    /// Checks the participant list and the payer.
    ///
    /// # Errors
    ///
    /// Fails if the list is empty, repeats a member, or omits the payer.
    pub fn check_participants(paid_by: UserId, participants: &[UserId]) -> Result<(), ExpenseError> {
        if participants.is_empty() {
            return Err(ExpenseError::NoParticipants);
        }

        for (index, id) in participants.iter().enumerate() {
            if participants[..index].contains(id) {
                return Err(ExpenseError::DuplicateParticipant(*id));
            }
        }

        if !participants.contains(&paid_by) {
            return Err(ExpenseError::PayerNotParticipant);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paymeback_shared::types::GroupId;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    const ALICE: UserId = UserId(1);
    const BOB: UserId = UserId(2);
    const CAROL: UserId = UserId(3);

    fn input(amount: Decimal, paid_by: UserId, participants: &[UserId]) -> NewExpense {
        NewExpense {
            group_id: GroupId(1),
            paid_by,
            amount,
            description: "Dinner".to_string(),
            participant_ids: participants.to_vec(),
        }
    }

    #[test]
    fn test_valid_expense() {
        let validated =
            ExpenseValidator::validate(input(dec!(90), ALICE, &[ALICE, BOB, CAROL]), &[ALICE, BOB, CAROL])
                .unwrap();

        assert_eq!(validated.amount_cents, 9000);
        assert_eq!(validated.paid_by, ALICE);
        assert_eq!(validated.participant_ids, vec![ALICE, BOB, CAROL]);
        assert_eq!(validated.description, "Dinner");
    }

    #[test]
    fn test_blank_description_is_allowed() {
        let mut expense = input(dec!(5), ALICE, &[ALICE]);
        expense.description = String::new();
        assert!(ExpenseValidator::validate(expense, &[ALICE]).is_ok());
    }

    #[rstest]
    #[case::zero(dec!(0), ExpenseError::NonPositiveAmount)]
    #[case::negative(dec!(-12.50), ExpenseError::NonPositiveAmount)]
    #[case::below_half_cent(dec!(0.004), ExpenseError::AmountBelowMinimumUnit)]
    #[case::huge(Decimal::MAX, ExpenseError::AmountOutOfRange)]
    fn test_invalid_amounts(#[case] amount: Decimal, #[case] expected: ExpenseError) {
        assert_eq!(ExpenseValidator::amount_cents(amount), Err(expected));
    }

    #[rstest]
    #[case::one_cent(dec!(0.01), 1)]
    #[case::rounds_up(dec!(10.006), 1001)]
    #[case::rounds_down(dec!(10.004), 1000)]
    #[case::whole(dec!(42), 4200)]
    fn test_amount_cents(#[case] amount: Decimal, #[case] cents: i64) {
        assert_eq!(ExpenseValidator::amount_cents(amount), Ok(cents));
    }

    #[rstest]
    #[case::empty(ALICE, vec![], ExpenseError::NoParticipants)]
    #[case::payer_missing(ALICE, vec![BOB, CAROL], ExpenseError::PayerNotParticipant)]
    #[case::duplicate(ALICE, vec![ALICE, BOB, ALICE], ExpenseError::DuplicateParticipant(ALICE))]
    fn test_invalid_participants(
        #[case] paid_by: UserId,
        #[case] participants: Vec<UserId>,
        #[case] expected: ExpenseError,
    ) {
        assert_eq!(
            ExpenseValidator::check_participants(paid_by, &participants),
            Err(expected)
        );
    }

    #[test]
    fn test_participant_must_be_member() {
        let result = ExpenseValidator::validate(input(dec!(10), ALICE, &[ALICE, UserId(9)]), &[ALICE, BOB]);
        assert_eq!(result, Err(ExpenseError::ParticipantNotMember(UserId(9))));
    }

    #[test]
    fn test_amount_checked_before_participants() {
        let result = ExpenseValidator::validate(input(dec!(0), ALICE, &[]), &[ALICE]);
        assert_eq!(result, Err(ExpenseError::NonPositiveAmount));
    }
}
