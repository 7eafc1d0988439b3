//! Shared numeric helpers for payroll math.

use rust_decimal::Decimal;

/// Rounds to two decimal places, midpoint away from zero.
///
/// Applied at result boundaries only — never inside a bracket walk, so
/// rounding error does not compound across brackets.
///
/// ```
/// use rust_decimal_macros::dec;
/// use payslip_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(253.4136)), dec!(253.41));
/// assert_eq!(round_half_up(dec!(36.555)), dec!(36.56));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps a value to zero from below.
pub fn non_negative(value: Decimal) -> Decimal {
    if value > Decimal::ZERO { value } else { Decimal::ZERO }
}
