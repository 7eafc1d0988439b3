//! Interface to the storage collaborator.
//!
//! The core never fetches configuration or persists records on its own;
//! schedules and payroll constants are passed into the calculators as
//! values. This trait is the seam the surrounding (network-bound)
//! application implements — a hosted database in production, an in-memory
//! backend in tests and seeding tools.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Country, PayrollConfig, PayslipExtracted, TaxBracket, TaxKind};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,

    #[error("storage error: {0}")]
    Storage(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

/// A payslip record as stored, with its assigned id.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPayslip {
    pub id: i64,
    pub record: PayslipExtracted,
}

#[async_trait]
pub trait PayslipRepository: Send + Sync {
    // Withholding schedules
    async fn get_brackets(
        &self,
        country: Country,
        kind: TaxKind,
        year: i32,
    ) -> Result<Vec<TaxBracket>, RepositoryError>;

    async fn insert_bracket(&self, bracket: &TaxBracket) -> Result<(), RepositoryError>;

    async fn delete_brackets(
        &self,
        country: Country,
        kind: TaxKind,
        year: i32,
    ) -> Result<(), RepositoryError>;

    // Payroll constants
    async fn get_payroll_config(
        &self,
        country: Country,
        year: i32,
    ) -> Result<PayrollConfig, RepositoryError>;

    async fn upsert_payroll_config(&self, config: &PayrollConfig) -> Result<(), RepositoryError>;

    // Extracted payslips
    async fn create_payslip(
        &self,
        record: PayslipExtracted,
    ) -> Result<StoredPayslip, RepositoryError>;

    async fn get_payslip(&self, id: i64) -> Result<StoredPayslip, RepositoryError>;

    async fn list_payslips(
        &self,
        country: Option<Country>,
    ) -> Result<Vec<StoredPayslip>, RepositoryError>;

    async fn delete_payslip(&self, id: i64) -> Result<(), RepositoryError>;
}
