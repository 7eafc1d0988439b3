//! Deterministic payroll math: progressive withholding, monthly salary
//! orchestration, and annual aggregates.

pub mod annual;
pub mod common;
pub mod salary;
pub mod withholding;

pub use annual::{AnnualTotals, ThirteenthSalary};
pub use salary::{PayrollCalculator, PayrollError};
pub use withholding::{Withholding, WithholdingError, income_tax, social_security};
