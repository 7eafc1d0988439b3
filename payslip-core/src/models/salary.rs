//! Inputs and outputs of the payroll calculator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::country::Country;

/// One salary calculation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryInput {
    /// Contractual gross salary for the month. Must not be negative.
    pub gross_salary: Decimal,

    /// Dependents counted for the income-tax deduction.
    pub dependents: u32,

    /// Children under 14, counted for the family allowance.
    pub children_under_14: u32,

    /// Non-taxable benefit amounts (meal/food allowances and the like).
    /// Added to total earnings, excluded from withholding bases.
    pub non_taxable_benefits: Decimal,

    /// Overtime hours worked in the period.
    pub overtime_hours: Decimal,

    /// Overtime pay multiplier. `None` uses the configured default (1.5).
    pub overtime_multiplier: Option<Decimal>,

    /// Flat deductions outside the statutory ones (union dues, advances).
    pub other_deductions: Decimal,
}

impl SalaryInput {
    /// A plain request for `gross` with no dependents, benefits, or overtime.
    pub fn from_gross(gross: Decimal) -> Self {
        Self {
            gross_salary: gross,
            dependents: 0,
            children_under_14: 0,
            non_taxable_benefits: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            overtime_multiplier: None,
            other_deductions: Decimal::ZERO,
        }
    }
}

/// One salary calculation result. Derived, not persisted by the calculator;
/// the caller decides what to store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryOutput {
    pub gross_salary: Decimal,
    pub overtime_pay: Decimal,
    pub family_allowance: Decimal,
    /// Gross + benefits + overtime + family allowance.
    pub total_earnings: Decimal,
    pub social_security: Decimal,
    /// Effective social-security rate (contribution / gross).
    pub social_security_rate: Decimal,
    pub income_tax: Decimal,
    /// Marginal income-tax rate of the containing bracket.
    pub income_tax_rate: Decimal,
    pub other_deductions: Decimal,
    pub total_deductions: Decimal,
    pub net_salary: Decimal,
    /// Net / gross; zero when gross is zero.
    pub net_to_gross_ratio: Decimal,
}

/// Per-year payroll constants for one country.
///
/// These change every fiscal year, so they are configuration inputs rather
/// than embedded literals — historical recalculation just loads another
/// year's row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollConfig {
    pub country: Country,
    pub year: i32,

    /// Ceiling for the monthly social-security contribution.
    pub social_security_cap: Decimal,

    /// Income-tax deduction per dependent.
    pub dependent_deduction: Decimal,

    /// Contractual hours per month used for the hourly rate (typically 220).
    pub standard_monthly_hours: Decimal,

    /// Overtime multiplier applied when the input does not specify one.
    pub default_overtime_multiplier: Decimal,

    /// Family allowance paid per child under 14.
    pub family_allowance_per_child: Decimal,

    /// Gross salary ceiling above which no family allowance is due.
    pub family_allowance_limit: Decimal,
}

impl PayrollConfig {
    /// Brazilian constants for fiscal year 2025.
    pub fn brazil_2025() -> Self {
        Self {
            country: Country::Brazil,
            year: 2025,
            social_security_cap: Decimal::new(95163, 2),
            dependent_deduction: Decimal::new(18959, 2),
            standard_monthly_hours: Decimal::from(220),
            default_overtime_multiplier: Decimal::new(15, 1),
            family_allowance_per_child: Decimal::new(6204, 2),
            family_allowance_limit: Decimal::new(181926, 2),
        }
    }
}
