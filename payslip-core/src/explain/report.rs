//! Rule-based pedagogical report over a normalized payslip.
//!
//! The generator is a total function: missing fields degrade to generic
//! phrasing, and no record — however sparse — makes it fail. It explains,
//! it never corrects: a reconciliation mismatch becomes an observation, not
//! a silent fix-up.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::PayslipExtracted;

use super::format::format_currency;

/// The structured explanation handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub summary: String,
    pub earnings: Vec<String>,
    pub deductions: Vec<String>,
    pub exceptional_items: Vec<String>,
    pub observations: Vec<String>,
}

/// Keyword groups for the exceptional-items scan, across the supported
/// locales. Metadata fields are excluded from the scan, so timestamps and
/// enum labels cannot trigger a match.
const EXCEPTIONAL_KEYWORDS: [(&str, &[&str]); 4] = [
    ("vacation pay", &["vacation", "ferias", "férias", "conges", "congés"]),
    (
        "thirteenth salary",
        &["thirteenth", "decimo", "décimo", "natal", "treizieme", "treizième"],
    ),
    (
        "bonus",
        &["bonus", "premio", "prémio", "prime", "gratificacao", "gratificação"],
    ),
    (
        "overtime",
        &["overtime", "extras", "suplementar", "supplementaires", "supplémentaires"],
    ),
];

const METADATA_KEYS: [&str; 4] = ["country", "confidence", "method", "extracted_at"];

/// Builds the report for one record.
pub fn generate(record: &PayslipExtracted) -> Explanation {
    Explanation {
        summary: summary_sentence(record),
        earnings: earnings_lines(record),
        deductions: deduction_lines(record),
        exceptional_items: exceptional_items(record),
        observations: observations(record),
    }
}

fn summary_sentence(record: &PayslipExtracted) -> String {
    let period = record
        .period_start
        .as_deref()
        .unwrap_or("period not provided");
    let employee = record
        .employee_name
        .as_deref()
        .unwrap_or("employee not identified");

    // Gross is preferred; total earnings stands in when gross is unknown.
    let gross = record.gross_salary.or(record.total_earnings);
    let money = |v: Option<Decimal>, missing: &str| match v {
        Some(amount) => format_currency(amount, record.country),
        None => missing.to_string(),
    };

    format!(
        "Payslip for {period}, issued to {employee}: gross pay {}, total deductions {}, net pay {}.",
        money(gross, "not stated"),
        money(record.total_deductions, "not stated"),
        money(record.net_salary, "not stated"),
    )
}

fn earnings_lines(record: &PayslipExtracted) -> Vec<String> {
    let items = [
        ("Gross salary", record.gross_salary),
        ("Overtime", record.overtime_pay),
        ("Vacation pay", record.vacation_pay),
        ("Vacation bonus", record.vacation_bonus),
        ("Thirteenth salary", record.thirteenth_salary),
        ("Bonus", record.bonus),
        ("Meal allowance", record.meal_allowance),
        ("Food allowance", record.food_allowance),
        ("Total earnings", record.total_earnings),
    ];
    labeled_lines(&items, record)
}

fn deduction_lines(record: &PayslipExtracted) -> Vec<String> {
    let items = [
        ("Social security", record.social_security),
        ("Income tax", record.income_tax),
        ("Health insurance", record.health_insurance),
        ("Dental insurance", record.dental_insurance),
        ("Private pension", record.private_pension),
        ("Total deductions", record.total_deductions),
    ];
    labeled_lines(&items, record)
}

fn labeled_lines(items: &[(&str, Option<Decimal>)], record: &PayslipExtracted) -> Vec<String> {
    items
        .iter()
        .filter_map(|(label, value)| {
            value.map(|v| format!("{label}: {}", format_currency(v, record.country)))
        })
        .collect()
}

/// Naive keyword scan over the serialized record.
fn exceptional_items(record: &PayslipExtracted) -> Vec<String> {
    let Ok(Value::Object(map)) = serde_json::to_value(record) else {
        return vec!["no exceptional items".to_string()];
    };

    let haystack: String = map
        .iter()
        .filter(|(key, value)| !value.is_null() && !METADATA_KEYS.contains(&key.as_str()))
        .map(|(key, value)| format!("{key} {value} "))
        .collect::<String>()
        .to_lowercase();

    let found: Vec<String> = EXCEPTIONAL_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| haystack.contains(k)))
        .map(|(label, _)| format!("{label} present in this period"))
        .collect();

    if found.is_empty() {
        vec!["no exceptional items".to_string()]
    } else {
        found
    }
}

fn observations(record: &PayslipExtracted) -> Vec<String> {
    let mut notes = Vec::new();

    if let (Some(gross), Some(deductions), Some(net)) = (
        record.gross_salary,
        record.total_deductions,
        record.net_salary,
    ) {
        let computed = gross - deductions;
        let difference = (computed - net).abs();
        if difference > Decimal::new(1, 2) {
            notes.push(format!(
                "Reported net pay {} does not match gross minus deductions {} (difference {}).",
                format_currency(net, record.country),
                format_currency(computed, record.country),
                format_currency(difference, record.country),
            ));
        }
    }

    notes
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::models::Country;

    use super::*;

    fn fixture_record() -> PayslipExtracted {
        let mut record = PayslipExtracted::empty(Country::Brazil);
        record.employee_name = Some("Maria Silva".to_string());
        record.period_start = Some("01/2025".to_string());
        record.gross_salary = Some(dec!(3000.00));
        record.total_deductions = Some(dec!(289.96));
        record.net_salary = Some(dec!(2710.04));
        record.social_security = Some(dec!(253.41));
        record.income_tax = Some(dec!(36.55));
        record
    }

    #[test]
    fn summary_uses_locale_formatting() {
        let report = generate(&fixture_record());

        assert!(report.summary.contains("3.000,00"), "{}", report.summary);
        assert!(report.summary.contains("2.710,04"), "{}", report.summary);
        assert!(report.summary.contains("Maria Silva"));
        assert!(report.summary.contains("01/2025"));
    }

    #[test]
    fn balanced_record_has_no_observations() {
        let report = generate(&fixture_record());

        assert_eq!(report.observations, Vec::<String>::new());
    }

    #[test]
    fn reconciliation_mismatch_is_flagged_not_fixed() {
        let mut record = fixture_record();
        record.net_salary = Some(dec!(2500.00));

        let report = generate(&record);

        assert_eq!(report.observations.len(), 1);
        assert!(report.observations[0].contains("2.500,00"));
        assert!(report.observations[0].contains("2.710,04"));
    }

    #[test]
    fn one_cent_difference_is_within_tolerance() {
        let mut record = fixture_record();
        record.net_salary = Some(dec!(2710.03));

        assert_eq!(generate(&record).observations, Vec::<String>::new());
    }

    #[test]
    fn missing_fields_degrade_to_generic_phrasing() {
        let mut record = PayslipExtracted::empty(Country::Brazil);
        record.employee_name = Some("Maria Silva".to_string());

        let report = generate(&record);

        assert!(report.summary.contains("period not provided"));
        assert!(report.summary.contains("not stated"));
        assert_eq!(report.earnings, Vec::<String>::new());
    }

    #[test]
    fn fully_empty_record_still_produces_a_report() {
        let report = generate(&PayslipExtracted::empty(Country::France));

        assert!(report.summary.contains("employee not identified"));
        assert_eq!(report.exceptional_items, vec!["no exceptional items".to_string()]);
    }

    #[test]
    fn thirteenth_salary_is_reported_as_exceptional() {
        let mut record = fixture_record();
        record.thirteenth_salary = Some(dec!(3000.00));

        let report = generate(&record);

        assert!(
            report
                .exceptional_items
                .iter()
                .any(|i| i.contains("thirteenth salary")),
            "{:?}",
            report.exceptional_items
        );
    }

    #[test]
    fn regular_record_reports_no_exceptional_items() {
        let report = generate(&fixture_record());

        assert_eq!(report.exceptional_items, vec!["no exceptional items".to_string()]);
    }

    #[test]
    fn overtime_and_vacation_are_both_listed() {
        let mut record = fixture_record();
        record.overtime_pay = Some(dec!(150.00));
        record.vacation_pay = Some(dec!(1000.00));

        let report = generate(&record);

        assert!(report.exceptional_items.iter().any(|i| i.contains("overtime")));
        assert!(report.exceptional_items.iter().any(|i| i.contains("vacation")));
    }

    #[test]
    fn earnings_and_deductions_lists_carry_formatted_values() {
        let report = generate(&fixture_record());

        assert!(report.earnings.contains(&"Gross salary: 3.000,00".to_string()));
        assert!(report.deductions.contains(&"Social security: 253,41".to_string()));
        assert!(report.deductions.contains(&"Income tax: 36,55".to_string()));
    }
}
