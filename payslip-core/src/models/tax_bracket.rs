//! Progressive withholding schedules.
//!
//! A schedule is a list of [`TaxBracket`] rows for one (country, kind, year)
//! triple. Brackets use shared boundaries: a bracket covers amounts strictly
//! above `min_amount` up to and including `max_amount`, so the next bracket's
//! `min_amount` equals the previous bracket's `max_amount`.
//!
//! Schedules come from configuration and are validated once at load time via
//! [`validate_schedule`]; the calculators assume a well-formed table and only
//! re-check what they cannot avoid (empty input, no containing bracket).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::country::Country;

/// The two withholding styles a schedule can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxKind {
    /// Cumulative per-bracket contribution, clamped to a configured cap
    /// (INSS-style).
    SocialSecurity,
    /// Single containing bracket, `base × rate − fixed_deduction`
    /// (IRRF-style).
    IncomeTax,
}

impl TaxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SocialSecurity => "social_security",
            Self::IncomeTax => "income_tax",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "social_security" => Some(Self::SocialSecurity),
            "income_tax" => Some(Self::IncomeTax),
            _ => None,
        }
    }
}

/// One row of a progressive schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub country: Country,
    pub kind: TaxKind,
    pub year: i32,
    pub min_amount: Decimal,
    /// `None` means the bracket is unbounded above.
    pub max_amount: Option<Decimal>,
    /// Fraction of the base taxed within this bracket (0.075 = 7.5%).
    pub rate: Decimal,
    /// Subtracted once from the bracket-rate product. Only meaningful for
    /// [`TaxKind::IncomeTax`] schedules; zero elsewhere.
    pub fixed_deduction: Decimal,
    pub active: bool,
}

/// Configuration errors detected in a bracket schedule.
///
/// A malformed table must never silently produce wrong withholding amounts,
/// so loaders surface these before any calculation runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("bracket schedule is empty")]
    Empty,

    #[error("schedule mixes countries, kinds, or years")]
    Heterogeneous,

    #[error("first bracket must start at zero, starts at {0}")]
    NonZeroStart(Decimal),

    #[error("bracket starting at {min} ends below its own minimum ({max})")]
    InvertedBounds { min: Decimal, max: Decimal },

    #[error("gap between bracket ending at {end} and bracket starting at {start}")]
    Gap { end: Decimal, start: Decimal },

    #[error("bracket starting at {start} overlaps the previous bracket ending at {end}")]
    Overlap { end: Decimal, start: Decimal },

    #[error("unbounded bracket is not the last in the schedule")]
    UnboundedNotLast,

    #[error("income-tax schedule must end in an unbounded bracket")]
    BoundedTop,

    #[error("bracket starting at {min} has rate {rate}, expected within [0, 1)")]
    InvalidRate { min: Decimal, rate: Decimal },

    #[error("bracket starting at {min} has negative fixed deduction {deduction}")]
    NegativeDeduction { min: Decimal, deduction: Decimal },
}

/// Validates that `brackets` forms a coherent schedule.
///
/// Checks, in order: non-empty, homogeneous (single country/kind/year),
/// contiguous coverage starting at zero with no gaps or overlaps, sane rates
/// and deductions, and top-bracket shape. Income-tax schedules must end
/// unbounded (every base has a containing bracket); social-security
/// schedules may end at the contribution ceiling, since amounts above it are
/// handled by the cap.
///
/// The input does not need to be pre-sorted.
pub fn validate_schedule(brackets: &[TaxBracket]) -> Result<(), ScheduleError> {
    let Some(first) = brackets.first() else {
        return Err(ScheduleError::Empty);
    };

    if brackets.iter().any(|b| {
        b.country != first.country || b.kind != first.kind || b.year != first.year
    }) {
        return Err(ScheduleError::Heterogeneous);
    }

    let mut sorted: Vec<&TaxBracket> = brackets.iter().collect();
    sorted.sort_by(|a, b| a.min_amount.cmp(&b.min_amount));

    if sorted[0].min_amount != Decimal::ZERO {
        return Err(ScheduleError::NonZeroStart(sorted[0].min_amount));
    }

    for (i, bracket) in sorted.iter().enumerate() {
        if bracket.rate < Decimal::ZERO || bracket.rate >= Decimal::ONE {
            return Err(ScheduleError::InvalidRate {
                min: bracket.min_amount,
                rate: bracket.rate,
            });
        }
        if bracket.fixed_deduction < Decimal::ZERO {
            return Err(ScheduleError::NegativeDeduction {
                min: bracket.min_amount,
                deduction: bracket.fixed_deduction,
            });
        }

        match bracket.max_amount {
            Some(max) if max <= bracket.min_amount => {
                return Err(ScheduleError::InvertedBounds {
                    min: bracket.min_amount,
                    max,
                });
            }
            None if i + 1 < sorted.len() => return Err(ScheduleError::UnboundedNotLast),
            _ => {}
        }

        if let Some(next) = sorted.get(i + 1) {
            // The unbounded-not-last case is already rejected above.
            let end = bracket.max_amount.unwrap_or(Decimal::ZERO);
            if next.min_amount > end {
                return Err(ScheduleError::Gap {
                    end,
                    start: next.min_amount,
                });
            }
            if next.min_amount < end {
                return Err(ScheduleError::Overlap {
                    end,
                    start: next.min_amount,
                });
            }
        }
    }

    if first.kind == TaxKind::IncomeTax
        && sorted.last().is_some_and(|last| last.max_amount.is_some())
    {
        return Err(ScheduleError::BoundedTop);
    }

    Ok(())
}
