//! The canonical, country-agnostic payslip record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::country::Country;

/// How a record's fields were located in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    /// Every field came from regex matches over the OCR text.
    Regex,
    /// Every field came from document-AI entities.
    Entity,
    /// A mix of both sources.
    Hybrid,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regex => "regex",
            Self::Entity => "entity",
            Self::Hybrid => "hybrid",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "regex" => Some(Self::Regex),
            "entity" => Some(Self::Entity),
            "hybrid" => Some(Self::Hybrid),
            _ => None,
        }
    }
}

/// One normalized payslip, produced once per scanned document.
///
/// Every field is nullable: `None` means the extraction pipeline could not
/// find the value, which is routine, not an error. Monetary fields are
/// non-negative by construction of the normalizer — a negative raw value is
/// treated as a parse miss. Zero and "unknown" are never conflated.
///
/// Records are not mutated in place; a correction produces a new record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayslipExtracted {
    // Administrative identity
    pub employer_name: Option<String>,
    pub employer_tax_id: Option<String>,
    pub employee_name: Option<String>,
    pub employee_tax_id: Option<String>,
    pub job_title: Option<String>,
    pub admission_date: Option<String>,
    pub period_start: Option<String>,
    pub period_end: Option<String>,

    // Core financials
    pub gross_salary: Option<Decimal>,
    pub net_salary: Option<Decimal>,
    pub total_earnings: Option<Decimal>,
    pub total_deductions: Option<Decimal>,

    // Statutory withholdings
    pub social_security: Option<Decimal>,
    pub income_tax: Option<Decimal>,
    /// Base for the employer-funded severance fund (FGTS). Brazil only;
    /// always `None` elsewhere.
    pub payroll_fund_base: Option<Decimal>,
    pub payroll_fund_deposit: Option<Decimal>,

    // Vacation, bonuses, overtime
    pub vacation_pay: Option<Decimal>,
    pub vacation_bonus: Option<Decimal>,
    pub thirteenth_salary: Option<Decimal>,
    pub bonus: Option<Decimal>,
    pub overtime_pay: Option<Decimal>,

    // Benefits
    pub meal_allowance: Option<Decimal>,
    pub food_allowance: Option<Decimal>,
    pub health_insurance: Option<Decimal>,
    pub dental_insurance: Option<Decimal>,
    pub private_pension: Option<Decimal>,

    // Metadata
    pub country: Country,
    /// Deterministic completeness score in [0, 100], not a model probability.
    pub confidence: Decimal,
    pub method: ExtractionMethod,
    pub extracted_at: DateTime<Utc>,
}

impl PayslipExtracted {
    /// A record with every field unknown, stamped now.
    pub fn empty(country: Country) -> Self {
        Self {
            employer_name: None,
            employer_tax_id: None,
            employee_name: None,
            employee_tax_id: None,
            job_title: None,
            admission_date: None,
            period_start: None,
            period_end: None,
            gross_salary: None,
            net_salary: None,
            total_earnings: None,
            total_deductions: None,
            social_security: None,
            income_tax: None,
            payroll_fund_base: None,
            payroll_fund_deposit: None,
            vacation_pay: None,
            vacation_bonus: None,
            thirteenth_salary: None,
            bonus: None,
            overtime_pay: None,
            meal_allowance: None,
            food_allowance: None,
            health_insurance: None,
            dental_insurance: None,
            private_pension: None,
            country,
            confidence: Decimal::ZERO,
            method: ExtractionMethod::Hybrid,
            extracted_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_record_has_no_values_and_zero_confidence() {
        let record = PayslipExtracted::empty(Country::Portugal);

        assert_eq!(record.gross_salary, None);
        assert_eq!(record.employer_name, None);
        assert_eq!(record.confidence, Decimal::ZERO);
        assert_eq!(record.country, Country::Portugal);
    }

    #[test]
    fn extraction_method_round_trips() {
        for method in [
            ExtractionMethod::Regex,
            ExtractionMethod::Entity,
            ExtractionMethod::Hybrid,
        ] {
            assert_eq!(ExtractionMethod::parse(method.as_str()), Some(method));
        }
    }

    #[test]
    fn record_serializes_with_null_for_unknown_fields() {
        let record = PayslipExtracted::empty(Country::Brazil);
        let json = serde_json::to_value(&record).unwrap();

        assert!(json["gross_salary"].is_null());
        assert_eq!(json["country"], "Brazil");
    }
}
