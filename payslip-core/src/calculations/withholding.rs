//! The shared progressive-withholding engine.
//!
//! Two styles run over the same bracket model:
//!
//! - [`social_security`] — cumulative: each bracket taxes the slice of the
//!   base that falls within it, the per-bracket amounts are summed, and the
//!   sum is clamped to a configured ceiling contribution.
//! - [`income_tax`] — single lookup: the one bracket containing the base
//!   supplies `base × rate − fixed_deduction`, clamped to zero.
//!
//! A bracket contains amounts strictly above its minimum up to and
//! including its maximum. Amounts are never rounded mid-walk; results are
//! rounded to cents at the boundary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::{non_negative, round_half_up};
use crate::models::TaxBracket;

/// Errors from the withholding engine.
///
/// These indicate configuration problems; a zero or negative base is a
/// valid zero-tax input, not an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WithholdingError {
    #[error("no brackets provided")]
    EmptySchedule,

    #[error("no bracket contains base {0}")]
    NoContainingBracket(Decimal),
}

/// A withholding amount together with its rate.
///
/// For social security the rate is effective (amount / base); for income
/// tax it is the marginal rate of the containing bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withholding {
    pub amount: Decimal,
    pub rate: Decimal,
}

impl Withholding {
    pub const ZERO: Withholding = Withholding {
        amount: Decimal::ZERO,
        rate: Decimal::ZERO,
    };
}

/// Cumulative, capped contribution over a social-security schedule.
///
/// Walks brackets in ascending order, taxing the portion of `base` inside
/// each, then clamps the sum to `cap`. A base at or below zero yields
/// [`Withholding::ZERO`].
pub fn social_security(
    base: Decimal,
    brackets: &[TaxBracket],
    cap: Decimal,
) -> Result<Withholding, WithholdingError> {
    if brackets.is_empty() {
        return Err(WithholdingError::EmptySchedule);
    }
    if base <= Decimal::ZERO {
        return Ok(Withholding::ZERO);
    }

    let mut sorted: Vec<&TaxBracket> = brackets.iter().collect();
    sorted.sort_by(|a, b| a.min_amount.cmp(&b.min_amount));

    let mut contribution = Decimal::ZERO;
    for bracket in sorted {
        if bracket.min_amount >= base {
            break;
        }
        let upper = match bracket.max_amount {
            Some(max) => base.min(max),
            None => base,
        };
        contribution += (upper - bracket.min_amount) * bracket.rate;
    }

    let amount = round_half_up(contribution.min(cap));
    Ok(Withholding {
        amount,
        rate: amount / base,
    })
}

/// Single-bracket income-tax withholding with a per-bracket fixed deduction.
///
/// A base at or below zero short-circuits to [`Withholding::ZERO`] — a
/// negative taxable base is a valid zero-tax outcome, not an error.
pub fn income_tax(
    base: Decimal,
    brackets: &[TaxBracket],
) -> Result<Withholding, WithholdingError> {
    if brackets.is_empty() {
        return Err(WithholdingError::EmptySchedule);
    }
    if base <= Decimal::ZERO {
        return Ok(Withholding::ZERO);
    }

    let bracket = brackets
        .iter()
        .find(|b| {
            base > b.min_amount && b.max_amount.map_or(true, |max| base <= max)
        })
        .ok_or(WithholdingError::NoContainingBracket(base))?;

    let amount = round_half_up(non_negative(base * bracket.rate - bracket.fixed_deduction));
    Ok(Withholding {
        amount,
        rate: bracket.rate,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::models::{Country, TaxKind};

    use super::*;

    fn ss_bracket(min: Decimal, max: Option<Decimal>, rate: Decimal) -> TaxBracket {
        TaxBracket {
            country: Country::Brazil,
            kind: TaxKind::SocialSecurity,
            year: 2025,
            min_amount: min,
            max_amount: max,
            rate,
            fixed_deduction: dec!(0),
            active: true,
        }
    }

    fn it_bracket(
        min: Decimal,
        max: Option<Decimal>,
        rate: Decimal,
        deduction: Decimal,
    ) -> TaxBracket {
        TaxBracket {
            country: Country::Brazil,
            kind: TaxKind::IncomeTax,
            year: 2025,
            min_amount: min,
            max_amount: max,
            rate,
            fixed_deduction: deduction,
            active: true,
        }
    }

    /// Brazilian INSS schedule for 2025.
    fn inss_2025() -> Vec<TaxBracket> {
        vec![
            ss_bracket(dec!(0), Some(dec!(1518.00)), dec!(0.075)),
            ss_bracket(dec!(1518.00), Some(dec!(2793.88)), dec!(0.09)),
            ss_bracket(dec!(2793.88), Some(dec!(4190.83)), dec!(0.12)),
            ss_bracket(dec!(4190.83), Some(dec!(8157.41)), dec!(0.14)),
        ]
    }

    /// Brazilian IRRF schedule for 2025.
    fn irrf_2025() -> Vec<TaxBracket> {
        vec![
            it_bracket(dec!(0), Some(dec!(2259.20)), dec!(0), dec!(0)),
            it_bracket(dec!(2259.20), Some(dec!(2826.65)), dec!(0.075), dec!(169.44)),
            it_bracket(dec!(2826.65), Some(dec!(3751.05)), dec!(0.15), dec!(381.44)),
            it_bracket(dec!(3751.05), Some(dec!(4664.68)), dec!(0.225), dec!(662.77)),
            it_bracket(dec!(4664.68), None, dec!(0.275), dec!(896.00)),
        ]
    }

    const CAP_2025: Decimal = Decimal::from_parts(95163, 0, 0, false, 2);

    // =========================================================================
    // social_security
    // =========================================================================

    #[test]
    fn social_security_known_fixture() {
        // 1518 × 7.5% + 1275.88 × 9% + 206.12 × 12% = 253.4136
        let result = social_security(dec!(3000.00), &inss_2025(), CAP_2025).unwrap();

        assert_eq!(result.amount, dec!(253.41));
    }

    #[test]
    fn social_security_first_bracket_only() {
        let result = social_security(dec!(1000.00), &inss_2025(), CAP_2025).unwrap();

        assert_eq!(result.amount, dec!(75.00));
        assert_eq!(result.rate, dec!(0.075));
    }

    #[test]
    fn social_security_zero_base_is_zero() {
        let result = social_security(dec!(0), &inss_2025(), CAP_2025).unwrap();

        assert_eq!(result, Withholding::ZERO);
    }

    #[test]
    fn social_security_negative_base_is_zero() {
        let result = social_security(dec!(-500), &inss_2025(), CAP_2025).unwrap();

        assert_eq!(result, Withholding::ZERO);
    }

    #[test]
    fn social_security_never_exceeds_cap() {
        for base in [dec!(8157.41), dec!(10000), dec!(50000), dec!(1000000)] {
            let result = social_security(base, &inss_2025(), CAP_2025).unwrap();
            assert!(result.amount <= CAP_2025, "base {base} exceeded the cap");
        }
    }

    #[test]
    fn social_security_at_ceiling_equals_cap() {
        let result = social_security(dec!(8157.41), &inss_2025(), CAP_2025).unwrap();

        assert_eq!(result.amount, dec!(951.63));
    }

    #[test]
    fn social_security_is_monotonic_in_base() {
        let brackets = inss_2025();
        let bases = [
            dec!(100),
            dec!(1518),
            dec!(1518.01),
            dec!(2500),
            dec!(2793.88),
            dec!(3000),
            dec!(4190.83),
            dec!(5000),
            dec!(8157.41),
            dec!(9000),
            dec!(20000),
        ];
        let mut previous = Decimal::MIN;
        for base in bases {
            let amount = social_security(base, &brackets, CAP_2025).unwrap().amount;
            assert!(amount >= previous, "contribution decreased at base {base}");
            previous = amount;
        }
    }

    #[test]
    fn social_security_accepts_unsorted_brackets() {
        let mut brackets = inss_2025();
        brackets.reverse();
        let result = social_security(dec!(3000.00), &brackets, CAP_2025).unwrap();

        assert_eq!(result.amount, dec!(253.41));
    }

    #[test]
    fn social_security_empty_schedule_is_an_error() {
        assert_eq!(
            social_security(dec!(3000), &[], CAP_2025),
            Err(WithholdingError::EmptySchedule)
        );
    }

    // =========================================================================
    // income_tax
    // =========================================================================

    #[test]
    fn income_tax_known_fixture() {
        // 2746.59 × 7.5% − 169.44 = 36.55
        let result = income_tax(dec!(2746.59), &irrf_2025()).unwrap();

        assert_eq!(result.amount, dec!(36.55));
        assert_eq!(result.rate, dec!(0.075));
    }

    #[test]
    fn income_tax_exempt_bracket_pays_nothing() {
        let result = income_tax(dec!(2000.00), &irrf_2025()).unwrap();

        assert_eq!(result.amount, dec!(0));
        assert_eq!(result.rate, dec!(0));
    }

    #[test]
    fn income_tax_top_bracket() {
        // 10000 × 27.5% − 896.00 = 1854.00
        let result = income_tax(dec!(10000.00), &irrf_2025()).unwrap();

        assert_eq!(result.amount, dec!(1854.00));
        assert_eq!(result.rate, dec!(0.275));
    }

    #[test]
    fn income_tax_zero_base_short_circuits() {
        assert_eq!(income_tax(dec!(0), &irrf_2025()).unwrap(), Withholding::ZERO);
    }

    #[test]
    fn income_tax_negative_base_short_circuits() {
        assert_eq!(
            income_tax(dec!(-120.50), &irrf_2025()).unwrap(),
            Withholding::ZERO
        );
    }

    #[test]
    fn income_tax_result_is_clamped_to_zero() {
        // Just above the bracket edge the rate product is smaller than the
        // fixed deduction; the clamp keeps the result at zero.
        let brackets = vec![
            it_bracket(dec!(0), Some(dec!(1000)), dec!(0), dec!(0)),
            it_bracket(dec!(1000), None, dec!(0.075), dec!(100)),
        ];
        let result = income_tax(dec!(1001), &brackets).unwrap();

        assert_eq!(result.amount, dec!(0));
    }

    #[test]
    fn income_tax_is_monotonic_in_base() {
        let brackets = irrf_2025();
        let bases = [
            dec!(1000),
            dec!(2259.20),
            dec!(2300),
            dec!(2826.65),
            dec!(3000),
            dec!(3751.05),
            dec!(4664.68),
            dec!(5000),
            dec!(30000),
        ];
        let mut previous = Decimal::MIN;
        for base in bases {
            let amount = income_tax(base, &brackets).unwrap().amount;
            assert!(amount >= previous, "tax decreased at base {base}");
            previous = amount;
        }
    }

    #[test]
    fn income_tax_without_containing_bracket_is_an_error() {
        let brackets = vec![it_bracket(dec!(0), Some(dec!(1000)), dec!(0), dec!(0))];

        assert_eq!(
            income_tax(dec!(5000), &brackets),
            Err(WithholdingError::NoContainingBracket(dec!(5000)))
        );
    }

    #[test]
    fn income_tax_empty_schedule_is_an_error() {
        assert_eq!(
            income_tax(dec!(3000), &[]),
            Err(WithholdingError::EmptySchedule)
        );
    }
}
