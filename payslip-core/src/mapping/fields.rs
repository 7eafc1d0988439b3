//! The closed set of canonical payslip fields.
//!
//! Canonical fields replace the raw, locale-specific keys that extraction
//! produces. Lookup goes through an explicit per-country alias table
//! (`aliases`) instead of untyped key traversal, so a wrong field can never
//! be silently picked.

use rust_decimal::Decimal;

use crate::models::PayslipExtracted;

/// A canonical attribute of a payslip, independent of the source locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    EmployerName,
    EmployerTaxId,
    EmployeeName,
    EmployeeTaxId,
    JobTitle,
    AdmissionDate,
    PeriodStart,
    PeriodEnd,
    GrossSalary,
    NetSalary,
    TotalEarnings,
    TotalDeductions,
    SocialSecurity,
    IncomeTax,
    PayrollFundBase,
    PayrollFundDeposit,
    VacationPay,
    VacationBonus,
    ThirteenthSalary,
    Bonus,
    OvertimePay,
    MealAllowance,
    FoodAllowance,
    HealthInsurance,
    DentalInsurance,
    PrivatePension,
}

/// A normalized value ready to be assigned to a canonical field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Money(Decimal),
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 26] = [
        Self::EmployerName,
        Self::EmployerTaxId,
        Self::EmployeeName,
        Self::EmployeeTaxId,
        Self::JobTitle,
        Self::AdmissionDate,
        Self::PeriodStart,
        Self::PeriodEnd,
        Self::GrossSalary,
        Self::NetSalary,
        Self::TotalEarnings,
        Self::TotalDeductions,
        Self::SocialSecurity,
        Self::IncomeTax,
        Self::PayrollFundBase,
        Self::PayrollFundDeposit,
        Self::VacationPay,
        Self::VacationBonus,
        Self::ThirteenthSalary,
        Self::Bonus,
        Self::OvertimePay,
        Self::MealAllowance,
        Self::FoodAllowance,
        Self::HealthInsurance,
        Self::DentalInsurance,
        Self::PrivatePension,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmployerName => "employer_name",
            Self::EmployerTaxId => "employer_tax_id",
            Self::EmployeeName => "employee_name",
            Self::EmployeeTaxId => "employee_tax_id",
            Self::JobTitle => "job_title",
            Self::AdmissionDate => "admission_date",
            Self::PeriodStart => "period_start",
            Self::PeriodEnd => "period_end",
            Self::GrossSalary => "gross_salary",
            Self::NetSalary => "net_salary",
            Self::TotalEarnings => "total_earnings",
            Self::TotalDeductions => "total_deductions",
            Self::SocialSecurity => "social_security",
            Self::IncomeTax => "income_tax",
            Self::PayrollFundBase => "payroll_fund_base",
            Self::PayrollFundDeposit => "payroll_fund_deposit",
            Self::VacationPay => "vacation_pay",
            Self::VacationBonus => "vacation_bonus",
            Self::ThirteenthSalary => "thirteenth_salary",
            Self::Bonus => "bonus",
            Self::OvertimePay => "overtime_pay",
            Self::MealAllowance => "meal_allowance",
            Self::FoodAllowance => "food_allowance",
            Self::HealthInsurance => "health_insurance",
            Self::DentalInsurance => "dental_insurance",
            Self::PrivatePension => "private_pension",
        }
    }

    /// Whether the field holds a currency amount (as opposed to text).
    pub fn is_monetary(&self) -> bool {
        !matches!(
            self,
            Self::EmployerName
                | Self::EmployerTaxId
                | Self::EmployeeName
                | Self::EmployeeTaxId
                | Self::JobTitle
                | Self::AdmissionDate
                | Self::PeriodStart
                | Self::PeriodEnd
        )
    }

    /// Whether the record carries a value for this field.
    pub fn is_present_in(&self, record: &PayslipExtracted) -> bool {
        match self {
            Self::EmployerName => record.employer_name.is_some(),
            Self::EmployerTaxId => record.employer_tax_id.is_some(),
            Self::EmployeeName => record.employee_name.is_some(),
            Self::EmployeeTaxId => record.employee_tax_id.is_some(),
            Self::JobTitle => record.job_title.is_some(),
            Self::AdmissionDate => record.admission_date.is_some(),
            Self::PeriodStart => record.period_start.is_some(),
            Self::PeriodEnd => record.period_end.is_some(),
            Self::GrossSalary => record.gross_salary.is_some(),
            Self::NetSalary => record.net_salary.is_some(),
            Self::TotalEarnings => record.total_earnings.is_some(),
            Self::TotalDeductions => record.total_deductions.is_some(),
            Self::SocialSecurity => record.social_security.is_some(),
            Self::IncomeTax => record.income_tax.is_some(),
            Self::PayrollFundBase => record.payroll_fund_base.is_some(),
            Self::PayrollFundDeposit => record.payroll_fund_deposit.is_some(),
            Self::VacationPay => record.vacation_pay.is_some(),
            Self::VacationBonus => record.vacation_bonus.is_some(),
            Self::ThirteenthSalary => record.thirteenth_salary.is_some(),
            Self::Bonus => record.bonus.is_some(),
            Self::OvertimePay => record.overtime_pay.is_some(),
            Self::MealAllowance => record.meal_allowance.is_some(),
            Self::FoodAllowance => record.food_allowance.is_some(),
            Self::HealthInsurance => record.health_insurance.is_some(),
            Self::DentalInsurance => record.dental_insurance.is_some(),
            Self::PrivatePension => record.private_pension.is_some(),
        }
    }

    /// Writes a normalized value into the record. A kind mismatch between
    /// the field and the value is ignored — the normalizer coerces values
    /// before assignment, so this cannot occur there.
    pub(crate) fn assign(&self, record: &mut PayslipExtracted, value: FieldValue) {
        match (self, value) {
            (Self::EmployerName, FieldValue::Text(s)) => record.employer_name = Some(s),
            (Self::EmployerTaxId, FieldValue::Text(s)) => record.employer_tax_id = Some(s),
            (Self::EmployeeName, FieldValue::Text(s)) => record.employee_name = Some(s),
            (Self::EmployeeTaxId, FieldValue::Text(s)) => record.employee_tax_id = Some(s),
            (Self::JobTitle, FieldValue::Text(s)) => record.job_title = Some(s),
            (Self::AdmissionDate, FieldValue::Text(s)) => record.admission_date = Some(s),
            (Self::PeriodStart, FieldValue::Text(s)) => record.period_start = Some(s),
            (Self::PeriodEnd, FieldValue::Text(s)) => record.period_end = Some(s),
            (Self::GrossSalary, FieldValue::Money(v)) => record.gross_salary = Some(v),
            (Self::NetSalary, FieldValue::Money(v)) => record.net_salary = Some(v),
            (Self::TotalEarnings, FieldValue::Money(v)) => record.total_earnings = Some(v),
            (Self::TotalDeductions, FieldValue::Money(v)) => record.total_deductions = Some(v),
            (Self::SocialSecurity, FieldValue::Money(v)) => record.social_security = Some(v),
            (Self::IncomeTax, FieldValue::Money(v)) => record.income_tax = Some(v),
            (Self::PayrollFundBase, FieldValue::Money(v)) => record.payroll_fund_base = Some(v),
            (Self::PayrollFundDeposit, FieldValue::Money(v)) => {
                record.payroll_fund_deposit = Some(v)
            }
            (Self::VacationPay, FieldValue::Money(v)) => record.vacation_pay = Some(v),
            (Self::VacationBonus, FieldValue::Money(v)) => record.vacation_bonus = Some(v),
            (Self::ThirteenthSalary, FieldValue::Money(v)) => record.thirteenth_salary = Some(v),
            (Self::Bonus, FieldValue::Money(v)) => record.bonus = Some(v),
            (Self::OvertimePay, FieldValue::Money(v)) => record.overtime_pay = Some(v),
            (Self::MealAllowance, FieldValue::Money(v)) => record.meal_allowance = Some(v),
            (Self::FoodAllowance, FieldValue::Money(v)) => record.food_allowance = Some(v),
            (Self::HealthInsurance, FieldValue::Money(v)) => record.health_insurance = Some(v),
            (Self::DentalInsurance, FieldValue::Money(v)) => record.dental_insurance = Some(v),
            (Self::PrivatePension, FieldValue::Money(v)) => record.private_pension = Some(v),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::models::Country;

    use super::*;

    #[test]
    fn administrative_fields_are_textual_the_rest_monetary() {
        assert!(!CanonicalField::EmployerName.is_monetary());
        assert!(!CanonicalField::PeriodStart.is_monetary());
        assert!(CanonicalField::GrossSalary.is_monetary());
        assert!(CanonicalField::PrivatePension.is_monetary());
    }

    #[test]
    fn assign_and_presence_agree_for_every_field() {
        for field in CanonicalField::ALL {
            let mut record = PayslipExtracted::empty(Country::Brazil);
            assert!(!field.is_present_in(&record), "{field:?} present on empty");

            let value = if field.is_monetary() {
                FieldValue::Money(dec!(1))
            } else {
                FieldValue::Text("x".to_string())
            };
            field.assign(&mut record, value);
            assert!(field.is_present_in(&record), "{field:?} absent after assign");
        }
    }

    #[test]
    fn mismatched_value_kind_is_ignored() {
        let mut record = PayslipExtracted::empty(Country::Brazil);
        CanonicalField::GrossSalary.assign(&mut record, FieldValue::Text("3000".to_string()));

        assert!(record.gross_salary.is_none());
    }
}
