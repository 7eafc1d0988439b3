//! Monthly salary calculation.
//!
//! [`PayrollCalculator`] orchestrates the withholding engine and the
//! per-year payroll constants into one [`SalaryOutput`]:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Overtime pay: gross ÷ standard hours × hours × multiplier |
//! | 2    | Family allowance: per-child amount when gross ≤ ceiling |
//! | 3    | Total earnings: gross + benefits + overtime + allowance |
//! | 4    | Social security on the gross salary, capped |
//! | 5    | Income-tax base: gross − social security − dependent deductions |
//! | 6    | Income tax on that base (zero when the base is not positive) |
//! | 7    | Total deductions: social security + income tax + other |
//! | 8    | Net salary: earnings − deductions; ratio net ÷ gross |

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::round_half_up;
use crate::calculations::withholding::{self, Withholding, WithholdingError};
use crate::models::{PayrollConfig, SalaryInput, SalaryOutput, TaxBracket};

/// Errors from a salary calculation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayrollError {
    /// Negative gross salary is rejected outright rather than clamped; a
    /// zero gross is a valid degenerate input.
    #[error("gross salary must not be negative, got {0}")]
    NegativeGrossSalary(Decimal),

    #[error("{field} must not be negative, got {value}")]
    NegativeInput {
        field: &'static str,
        value: Decimal,
    },

    #[error(transparent)]
    Withholding(#[from] WithholdingError),
}

/// Calculator over one country/year's schedules and constants.
///
/// Holds borrowed bracket tables — the caller loads and validates them
/// before constructing the calculator, and they are never mutated here.
#[derive(Debug, Clone)]
pub struct PayrollCalculator<'a> {
    ss_brackets: &'a [TaxBracket],
    tax_brackets: &'a [TaxBracket],
    config: &'a PayrollConfig,
}

impl<'a> PayrollCalculator<'a> {
    pub fn new(
        ss_brackets: &'a [TaxBracket],
        tax_brackets: &'a [TaxBracket],
        config: &'a PayrollConfig,
    ) -> Self {
        Self {
            ss_brackets,
            tax_brackets,
            config,
        }
    }

    pub fn config(&self) -> &PayrollConfig {
        self.config
    }

    /// Overtime pay for `hours` at `multiplier` times the hourly rate.
    pub fn overtime_pay(&self, gross: Decimal, hours: Decimal, multiplier: Decimal) -> Decimal {
        if hours <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let hourly = gross / self.config.standard_monthly_hours;
        round_half_up(hourly * hours * multiplier)
    }

    /// Family allowance for children under 14, zero above the income ceiling.
    pub fn family_allowance(&self, gross: Decimal, children_under_14: u32) -> Decimal {
        if children_under_14 == 0 || gross > self.config.family_allowance_limit {
            return Decimal::ZERO;
        }
        self.config.family_allowance_per_child * Decimal::from(children_under_14)
    }

    /// Social security withheld on `gross`.
    pub fn social_security(&self, gross: Decimal) -> Result<Withholding, WithholdingError> {
        withholding::social_security(gross, self.ss_brackets, self.config.social_security_cap)
    }

    /// Income tax withheld for `gross` with `dependents`.
    ///
    /// The taxable base is gross minus the social-security contribution
    /// minus the per-dependent deduction. A non-positive base is a valid
    /// zero-tax outcome.
    pub fn income_tax(
        &self,
        gross: Decimal,
        social_security: Decimal,
        dependents: u32,
    ) -> Result<Withholding, WithholdingError> {
        let base = gross
            - social_security
            - self.config.dependent_deduction * Decimal::from(dependents);
        if base <= Decimal::ZERO {
            debug!(%gross, dependents, "income-tax base not positive, withholding zero");
        }
        withholding::income_tax(base, self.tax_brackets)
    }

    /// Runs the full monthly calculation.
    pub fn calculate(&self, input: &SalaryInput) -> Result<SalaryOutput, PayrollError> {
        if input.gross_salary < Decimal::ZERO {
            return Err(PayrollError::NegativeGrossSalary(input.gross_salary));
        }
        for (field, value) in [
            ("non_taxable_benefits", input.non_taxable_benefits),
            ("overtime_hours", input.overtime_hours),
            ("other_deductions", input.other_deductions),
        ] {
            if value < Decimal::ZERO {
                return Err(PayrollError::NegativeInput { field, value });
            }
        }

        let gross = input.gross_salary;
        let multiplier = input
            .overtime_multiplier
            .unwrap_or(self.config.default_overtime_multiplier);

        let overtime_pay = self.overtime_pay(gross, input.overtime_hours, multiplier);
        let family_allowance = self.family_allowance(gross, input.children_under_14);
        let total_earnings = round_half_up(
            gross + input.non_taxable_benefits + overtime_pay + family_allowance,
        );

        let ss = self.social_security(gross)?;
        let tax = self.income_tax(gross, ss.amount, input.dependents)?;

        let total_deductions = round_half_up(ss.amount + tax.amount + input.other_deductions);
        let net_salary = round_half_up(total_earnings - total_deductions);

        // Zero gross means an all-zero result; the ratio is defined as zero
        // rather than propagating a division error.
        let net_to_gross_ratio = if gross > Decimal::ZERO {
            net_salary / gross
        } else {
            Decimal::ZERO
        };

        Ok(SalaryOutput {
            gross_salary: gross,
            overtime_pay,
            family_allowance,
            total_earnings,
            social_security: ss.amount,
            social_security_rate: ss.rate,
            income_tax: tax.amount,
            income_tax_rate: tax.rate,
            other_deductions: input.other_deductions,
            total_deductions,
            net_salary,
            net_to_gross_ratio,
        })
    }
}
