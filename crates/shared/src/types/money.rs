//! Money helpers with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` in memory and integer cents at rest.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places amounts are presented and persisted with.
pub const DISPLAY_DECIMAL_PLACES: u32 = 2;

/// Amounts whose magnitude does not exceed this are treated as settled.
///
/// Applies to settlement detail entries and cross-group balance lines.
pub const SETTLEMENT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Returns true if the amount is too small to report.
#[must_use]
pub fn is_negligible(amount: Decimal) -> bool {
    amount.abs() <= SETTLEMENT_TOLERANCE
}

/// Rounds an amount to two decimal places for presentation.
///
/// Uses banker's rounding so repeated presentation does not drift.
#[must_use]
pub fn round_for_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(DISPLAY_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven)
}

/// Converts an amount to integer cents, rounding to the nearest cent.
///
/// Returns `None` if the amount does not fit in an `i64`.
#[must_use]
pub fn to_cents(amount: Decimal) -> Option<i64> {
    let mut rounded = round_for_display(amount);
    rounded.rescale(DISPLAY_DECIMAL_PLACES);
    i64::try_from(rounded.mantissa()).ok()
}

/// Converts integer cents back to a decimal amount.
#[must_use]
pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, DISPLAY_DECIMAL_PLACES)
}

#[cfg(test)]
#[path = "money_tests.rs"]
mod tests;
