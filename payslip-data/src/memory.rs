//! In-memory repository backend.
//!
//! The reference implementation of [`PayslipRepository`]: used by the
//! loader binary, by integration tests, and as the template a real storage
//! collaborator implements against its own backend.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use payslip_core::models::{Country, PayrollConfig, PayslipExtracted, TaxBracket, TaxKind};
use payslip_core::db::{PayslipRepository, RepositoryError, StoredPayslip};

#[derive(Default)]
struct State {
    brackets: Vec<TaxBracket>,
    configs: HashMap<(Country, i32), PayrollConfig>,
    payslips: HashMap<i64, PayslipExtracted>,
    next_id: i64,
}

/// Thread-safe in-memory store.
pub struct MemoryRepository {
    state: RwLock<State>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State {
                next_id: 1,
                ..State::default()
            }),
        }
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PayslipRepository for MemoryRepository {
    async fn get_brackets(
        &self,
        country: Country,
        kind: TaxKind,
        year: i32,
    ) -> Result<Vec<TaxBracket>, RepositoryError> {
        let state = self.state.read().await;
        let mut brackets: Vec<TaxBracket> = state
            .brackets
            .iter()
            .filter(|b| b.country == country && b.kind == kind && b.year == year && b.active)
            .cloned()
            .collect();
        brackets.sort_by(|a, b| a.min_amount.cmp(&b.min_amount));
        Ok(brackets)
    }

    async fn insert_bracket(&self, bracket: &TaxBracket) -> Result<(), RepositoryError> {
        self.state.write().await.brackets.push(bracket.clone());
        Ok(())
    }

    async fn delete_brackets(
        &self,
        country: Country,
        kind: TaxKind,
        year: i32,
    ) -> Result<(), RepositoryError> {
        self.state
            .write()
            .await
            .brackets
            .retain(|b| !(b.country == country && b.kind == kind && b.year == year));
        Ok(())
    }

    async fn get_payroll_config(
        &self,
        country: Country,
        year: i32,
    ) -> Result<PayrollConfig, RepositoryError> {
        self.state
            .read()
            .await
            .configs
            .get(&(country, year))
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn upsert_payroll_config(&self, config: &PayrollConfig) -> Result<(), RepositoryError> {
        self.state
            .write()
            .await
            .configs
            .insert((config.country, config.year), config.clone());
        Ok(())
    }

    async fn create_payslip(
        &self,
        record: PayslipExtracted,
    ) -> Result<StoredPayslip, RepositoryError> {
        let mut state = self.state.write().await;
        let id = state.next_id;
        state.next_id += 1;
        state.payslips.insert(id, record.clone());
        Ok(StoredPayslip { id, record })
    }

    async fn get_payslip(&self, id: i64) -> Result<StoredPayslip, RepositoryError> {
        self.state
            .read()
            .await
            .payslips
            .get(&id)
            .cloned()
            .map(|record| StoredPayslip { id, record })
            .ok_or(RepositoryError::NotFound)
    }

    async fn list_payslips(
        &self,
        country: Option<Country>,
    ) -> Result<Vec<StoredPayslip>, RepositoryError> {
        let state = self.state.read().await;
        let mut stored: Vec<StoredPayslip> = state
            .payslips
            .iter()
            .filter(|(_, record)| country.is_none_or(|c| record.country == c))
            .map(|(id, record)| StoredPayslip {
                id: *id,
                record: record.clone(),
            })
            .collect();
        stored.sort_by_key(|s| s.id);
        Ok(stored)
    }

    async fn delete_payslip(&self, id: i64) -> Result<(), RepositoryError> {
        self.state
            .write()
            .await
            .payslips
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}
