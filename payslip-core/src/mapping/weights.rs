//! Importance weights and the completeness-based confidence score.

use rust_decimal::Decimal;

use crate::calculations::common::round_half_up;
use crate::models::PayslipExtracted;

use super::aliases::applicable;
use super::fields::CanonicalField;

/// Importance weight of a canonical field for confidence aggregation.
///
/// Weights are not persisted per record; they only shape the score.
/// Metadata is not a canonical field and so carries no weight at all.
pub fn weight(field: CanonicalField) -> u32 {
    use CanonicalField::*;
    match field {
        GrossSalary | NetSalary => 10,
        EmployerName | EmployeeName => 8,
        SocialSecurity | IncomeTax => 7,
        TotalEarnings | TotalDeductions => 6,
        PeriodStart => 5,
        EmployerTaxId | EmployeeTaxId => 4,
        JobTitle | AdmissionDate | PayrollFundBase | PayrollFundDeposit => 3,
        PeriodEnd | VacationPay | VacationBonus | ThirteenthSalary | Bonus | OvertimePay
        | MealAllowance | FoodAllowance | HealthInsurance | DentalInsurance | PrivatePension => 2,
    }
}

/// Deterministic extraction confidence in [0, 100].
///
/// The weighted fraction of importance mass present in the record, scored
/// over the fields applicable to the record's country — a Portuguese
/// payslip is not penalized for lacking an FGTS line it could never have.
/// Reproducible from the record alone; identical inputs always score
/// identically.
pub fn extraction_confidence(record: &PayslipExtracted) -> Decimal {
    let mut present = 0u32;
    let mut total = 0u32;

    for field in CanonicalField::ALL {
        if !applicable(record.country, field) {
            continue;
        }
        let w = weight(field);
        total += w;
        if field.is_present_in(record) {
            present += w;
        }
    }

    if total == 0 {
        return Decimal::ZERO;
    }
    round_half_up(Decimal::from(100) * Decimal::from(present) / Decimal::from(total))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::mapping::fields::FieldValue;
    use crate::models::{Country, PayslipExtracted};

    use super::*;

    fn fully_populated(country: Country) -> PayslipExtracted {
        let mut record = PayslipExtracted::empty(country);
        for field in CanonicalField::ALL {
            let value = if field.is_monetary() {
                FieldValue::Money(dec!(1))
            } else {
                FieldValue::Text("x".to_string())
            };
            field.assign(&mut record, value);
        }
        record
    }

    #[test]
    fn all_null_record_scores_zero() {
        for country in Country::ALL {
            let record = PayslipExtracted::empty(country);
            assert_eq!(extraction_confidence(&record), Decimal::ZERO);
        }
    }

    #[test]
    fn fully_populated_record_scores_one_hundred() {
        for country in Country::ALL {
            let record = fully_populated(country);
            assert_eq!(extraction_confidence(&record), dec!(100));
        }
    }

    #[test]
    fn score_stays_within_bounds() {
        let mut record = PayslipExtracted::empty(Country::Brazil);
        record.gross_salary = Some(dec!(3000));
        record.employee_name = Some("Maria".to_string());

        let score = extraction_confidence(&record);
        assert!(score > Decimal::ZERO && score < dec!(100));
    }

    #[test]
    fn score_is_deterministic() {
        let mut record = PayslipExtracted::empty(Country::France);
        record.gross_salary = Some(dec!(2500));
        record.net_salary = Some(dec!(1950));

        assert_eq!(extraction_confidence(&record), extraction_confidence(&record));
    }

    #[test]
    fn inapplicable_fields_do_not_drag_the_score_down() {
        // Identically-populated records: the Portuguese one must not score
        // lower for lacking a payroll fund it cannot have.
        let mut br = PayslipExtracted::empty(Country::Brazil);
        let mut pt = PayslipExtracted::empty(Country::Portugal);
        for record in [&mut br, &mut pt] {
            record.gross_salary = Some(dec!(3000));
            record.net_salary = Some(dec!(2710));
        }

        assert!(extraction_confidence(&pt) >= extraction_confidence(&br));
    }

    #[test]
    fn heavier_fields_move_the_score_more() {
        let mut gross_only = PayslipExtracted::empty(Country::Brazil);
        gross_only.gross_salary = Some(dec!(3000));

        let mut dental_only = PayslipExtracted::empty(Country::Brazil);
        dental_only.dental_insurance = Some(dec!(30));

        assert!(extraction_confidence(&gross_only) > extraction_confidence(&dental_only));
    }
}
