//! Thirteenth salary and annual aggregates.
//!
//! The thirteenth salary is a statutory bonus equal to one month of the
//! base gross, with its own withholding run — benefits and overtime do not
//! enter it. Annual totals are twelve regular months plus the thirteenth.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;
use crate::calculations::salary::{PayrollCalculator, PayrollError};
use crate::models::SalaryInput;

/// Withholding breakdown of the thirteenth-salary payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThirteenthSalary {
    pub gross: Decimal,
    pub social_security: Decimal,
    pub income_tax: Decimal,
    pub net: Decimal,
}

/// Yearly aggregates for a fixed monthly input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualTotals {
    pub gross: Decimal,
    pub total_earnings: Decimal,
    pub social_security: Decimal,
    pub income_tax: Decimal,
    pub net: Decimal,
    pub thirteenth: ThirteenthSalary,
}

impl<'a> PayrollCalculator<'a> {
    /// Thirteenth salary on the base gross, with `dependents` counted for
    /// the income-tax deduction.
    pub fn thirteenth_salary(
        &self,
        gross: Decimal,
        dependents: u32,
    ) -> Result<ThirteenthSalary, PayrollError> {
        let output = self.calculate(&SalaryInput {
            dependents,
            ..SalaryInput::from_gross(gross)
        })?;

        Ok(ThirteenthSalary {
            gross,
            social_security: output.social_security,
            income_tax: output.income_tax,
            net: output.net_salary,
        })
    }

    /// Twelve months of `input` plus the thirteenth salary.
    pub fn annual_totals(&self, input: &SalaryInput) -> Result<AnnualTotals, PayrollError> {
        let monthly = self.calculate(input)?;
        let thirteenth = self.thirteenth_salary(input.gross_salary, input.dependents)?;
        let twelve = Decimal::from(12);

        Ok(AnnualTotals {
            gross: round_half_up(monthly.gross_salary * twelve + thirteenth.gross),
            total_earnings: round_half_up(monthly.total_earnings * twelve + thirteenth.gross),
            social_security: round_half_up(
                monthly.social_security * twelve + thirteenth.social_security,
            ),
            income_tax: round_half_up(monthly.income_tax * twelve + thirteenth.income_tax),
            net: round_half_up(monthly.net_salary * twelve + thirteenth.net),
            thirteenth,
        })
    }
}
