use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use payslip_core::PayslipRepository;
use payslip_data::{BracketLoader, MemoryRepository};

/// Validate withholding-schedule CSV files and optionally emit the
/// validated tables as JSON for seeding the hosted database.
///
/// The CSV file should have the following columns:
/// - country: supported country code (BR, PT, FR)
/// - tax_kind: social_security or income_tax
/// - year: fiscal year (e.g., 2025)
/// - min_amount: inclusive lower bound of the bracket
/// - max_amount: upper bound (empty for unbounded)
/// - rate: bracket rate as a fraction (e.g., 0.075)
/// - fixed_deduction: per-bracket fixed deduction
#[derive(Parser, Debug)]
#[command(name = "payslip-data-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing bracket data
    #[arg(short, long)]
    file: PathBuf,

    /// Write the validated brackets as JSON to this path
    #[arg(short, long)]
    emit_json: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    println!("Loading brackets from: {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = BracketLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    println!("Parsed {} records from CSV", records.len());

    let repo = MemoryRepository::new();
    let inserted = BracketLoader::load(&repo, &records)
        .await
        .context("Schedule validation failed")?;

    println!("Validated and loaded {inserted} brackets.");

    if let Some(path) = &args.emit_json {
        let brackets = BracketLoader::validate(&records)?;
        let json = serde_json::to_string_pretty(&brackets)
            .context("Failed to serialize brackets")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write: {}", path.display()))?;
        println!("Wrote validated brackets to {}", path.display());
    }

    // Per-schedule summary, reading back through the repository the way a
    // consumer would.
    let mut schedules: Vec<(String, String, i32)> = records
        .iter()
        .map(|r| (r.country.clone(), r.tax_kind.clone(), r.year))
        .collect();
    schedules.sort();
    schedules.dedup();
    for (country_code, kind_code, year) in schedules {
        let country = payslip_core::Country::parse(&country_code)
            .context("country vanished after validation")?;
        let kind = payslip_core::TaxKind::parse(&kind_code)
            .context("tax kind vanished after validation")?;
        let loaded = repo.get_brackets(country, kind, year).await?;
        println!("  {country_code}/{kind_code}/{year}: {} brackets", loaded.len());
    }

    Ok(())
}
