//! Compatibility seam with the pre-existing flat payslip shape.
//!
//! Older storage rows and UI code exchange a flat record whose field names
//! predate the canonical schema. The converters here are pure, total, and
//! deliberately lossy: canonical fields with no legacy counterpart
//! (vacation pay and bonus, thirteenth salary, bonus, overtime pay, the
//! period end date) are dropped on the way out and come back as `None`.
//! This is a translation layer, not business logic.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::country::Country;
use super::payslip::{ExtractionMethod, PayslipExtracted};

/// The legacy flat payslip row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyPayslip {
    pub company_name: Option<String>,
    pub company_tax_id: Option<String>,
    pub employee_name: Option<String>,
    pub employee_document: Option<String>,
    pub role: Option<String>,
    pub admission_date: Option<String>,
    /// The legacy shape stores a single reference period, not a start/end
    /// pair; the canonical period start maps onto it.
    pub reference_period: Option<String>,
    pub gross_salary: Option<Decimal>,
    pub net_salary: Option<Decimal>,
    pub total_earnings: Option<Decimal>,
    pub total_deductions: Option<Decimal>,
    pub inss_value: Option<Decimal>,
    pub irrf_value: Option<Decimal>,
    pub fgts_base: Option<Decimal>,
    pub fgts_value: Option<Decimal>,
    pub meal_voucher: Option<Decimal>,
    pub food_voucher: Option<Decimal>,
    pub health_plan: Option<Decimal>,
    pub dental_plan: Option<Decimal>,
    pub pension_plan: Option<Decimal>,
    pub country: String,
    pub confidence: Decimal,
    pub extraction_method: String,
    pub processed_at: DateTime<Utc>,
}

/// Flattens a canonical record into the legacy shape. Never fails.
pub fn to_legacy(record: &PayslipExtracted) -> LegacyPayslip {
    LegacyPayslip {
        company_name: record.employer_name.clone(),
        company_tax_id: record.employer_tax_id.clone(),
        employee_name: record.employee_name.clone(),
        employee_document: record.employee_tax_id.clone(),
        role: record.job_title.clone(),
        admission_date: record.admission_date.clone(),
        reference_period: record.period_start.clone(),
        gross_salary: record.gross_salary,
        net_salary: record.net_salary,
        total_earnings: record.total_earnings,
        total_deductions: record.total_deductions,
        inss_value: record.social_security,
        irrf_value: record.income_tax,
        fgts_base: record.payroll_fund_base,
        fgts_value: record.payroll_fund_deposit,
        meal_voucher: record.meal_allowance,
        food_voucher: record.food_allowance,
        health_plan: record.health_insurance,
        dental_plan: record.dental_insurance,
        pension_plan: record.private_pension,
        country: record.country.as_str().to_string(),
        confidence: record.confidence,
        extraction_method: record.method.as_str().to_string(),
        processed_at: record.extracted_at,
    }
}

/// Rebuilds a canonical record from the legacy shape. Never fails:
/// unrecognized country or method strings fall back to Brazil and hybrid,
/// the defaults of the legacy application.
pub fn from_legacy(legacy: &LegacyPayslip) -> PayslipExtracted {
    let country = Country::parse(&legacy.country).unwrap_or(Country::Brazil);
    let mut record = PayslipExtracted::empty(country);

    record.employer_name = legacy.company_name.clone();
    record.employer_tax_id = legacy.company_tax_id.clone();
    record.employee_name = legacy.employee_name.clone();
    record.employee_tax_id = legacy.employee_document.clone();
    record.job_title = legacy.role.clone();
    record.admission_date = legacy.admission_date.clone();
    record.period_start = legacy.reference_period.clone();
    record.gross_salary = legacy.gross_salary;
    record.net_salary = legacy.net_salary;
    record.total_earnings = legacy.total_earnings;
    record.total_deductions = legacy.total_deductions;
    record.social_security = legacy.inss_value;
    record.income_tax = legacy.irrf_value;
    record.payroll_fund_base = legacy.fgts_base;
    record.payroll_fund_deposit = legacy.fgts_value;
    record.meal_allowance = legacy.meal_voucher;
    record.food_allowance = legacy.food_voucher;
    record.health_insurance = legacy.health_plan;
    record.dental_insurance = legacy.dental_plan;
    record.private_pension = legacy.pension_plan;
    record.confidence = legacy.confidence.clamp(Decimal::ZERO, Decimal::from(100));
    record.method =
        ExtractionMethod::parse(&legacy.extraction_method).unwrap_or(ExtractionMethod::Hybrid);
    record.extracted_at = legacy.processed_at;

    record
}
