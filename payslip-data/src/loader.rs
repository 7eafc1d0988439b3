use std::collections::BTreeMap;
use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use payslip_core::models::{Country, ScheduleError, TaxBracket, TaxKind, validate_schedule};
use payslip_core::{PayslipRepository, RepositoryError};

/// Errors that can occur when loading bracket data.
#[derive(Debug, Error)]
pub enum BracketLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("unknown country code '{0}'")]
    UnknownCountry(String),

    #[error("unknown tax kind '{0}' (expected social_security or income_tax)")]
    UnknownTaxKind(String),

    #[error("invalid schedule for {country}/{kind}/{year}: {source}")]
    InvalidSchedule {
        country: &'static str,
        kind: &'static str,
        year: i32,
        source: ScheduleError,
    },

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<csv::Error> for BracketLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from a brackets CSV file.
///
/// Columns:
/// - `country`: supported country code (BR, PT, FR)
/// - `tax_kind`: `social_security` or `income_tax`
/// - `year`: fiscal year the bracket applies to
/// - `min_amount`: inclusive lower bound of the bracket
/// - `max_amount`: upper bound (empty for unbounded)
/// - `rate`: bracket rate as a fraction (0.075 for 7.5%)
/// - `fixed_deduction`: per-bracket fixed deduction (income-tax style only)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub country: String,
    pub tax_kind: String,
    pub year: i32,
    pub min_amount: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_amount: Option<Decimal>,
    pub rate: Decimal,
    pub fixed_deduction: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

impl BracketRecord {
    fn into_bracket(self) -> Result<TaxBracket, BracketLoaderError> {
        let country = Country::parse(&self.country)
            .ok_or_else(|| BracketLoaderError::UnknownCountry(self.country.clone()))?;
        let kind = TaxKind::parse(&self.tax_kind)
            .ok_or_else(|| BracketLoaderError::UnknownTaxKind(self.tax_kind.clone()))?;
        Ok(TaxBracket {
            country,
            kind,
            year: self.year,
            min_amount: self.min_amount,
            max_amount: self.max_amount,
            rate: self.rate,
            fixed_deduction: self.fixed_deduction,
            active: true,
        })
    }
}

/// Loader for withholding schedules from CSV files.
///
/// Works against any [`PayslipRepository`] backend. Every schedule is
/// validated before a single row is written — a malformed table is a
/// configuration error surfaced immediately, never loaded partially.
pub struct BracketLoader;

impl BracketLoader {
    /// Parse bracket records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Converts records to brackets and validates each (country, kind,
    /// year) schedule, without touching a repository.
    pub fn validate(
        records: &[BracketRecord],
    ) -> Result<Vec<TaxBracket>, BracketLoaderError> {
        let brackets = records
            .iter()
            .cloned()
            .map(BracketRecord::into_bracket)
            .collect::<Result<Vec<_>, _>>()?;

        let mut groups: BTreeMap<(&'static str, &'static str, i32), Vec<TaxBracket>> =
            BTreeMap::new();
        for bracket in &brackets {
            groups
                .entry((bracket.country.as_str(), bracket.kind.as_str(), bracket.year))
                .or_default()
                .push(bracket.clone());
        }

        for ((country, kind, year), schedule) in &groups {
            validate_schedule(schedule).map_err(|source| {
                BracketLoaderError::InvalidSchedule {
                    country,
                    kind,
                    year: *year,
                    source,
                }
            })?;
        }

        Ok(brackets)
    }

    /// Validates and loads the records into the repository.
    ///
    /// Existing brackets for each (country, kind, year) present in the
    /// input are replaced wholesale. Returns the number of inserted rows.
    pub async fn load(
        repo: &dyn PayslipRepository,
        records: &[BracketRecord],
    ) -> Result<usize, BracketLoaderError> {
        let brackets = Self::validate(records)?;

        let mut replaced: Vec<(Country, TaxKind, i32)> = Vec::new();
        for bracket in &brackets {
            let key = (bracket.country, bracket.kind, bracket.year);
            if !replaced.contains(&key) {
                repo.delete_brackets(bracket.country, bracket.kind, bracket.year)
                    .await?;
                replaced.push(key);
            }
            repo.insert_bracket(bracket).await?;
        }

        info!(
            schedules = replaced.len(),
            rows = brackets.len(),
            "loaded withholding schedules"
        );
        Ok(brackets.len())
    }
}
