//! Integration tests: CSV schedules through the repository into the
//! calculator and the explanation generator.

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

use payslip_core::PayslipRepository;
use payslip_core::calculations::PayrollCalculator;
use payslip_core::explain;
use payslip_core::extract::scan_document;
use payslip_core::models::{Country, PayrollConfig, SalaryInput, TaxKind};
use payslip_data::{BracketLoader, MemoryRepository};

const BRACKETS_BR_2025: &str = include_str!("../test-data/brackets_br_2025.csv");

async fn seeded_repository() -> MemoryRepository {
    let repo = MemoryRepository::new();
    let records =
        BracketLoader::parse(BRACKETS_BR_2025.as_bytes()).expect("failed to parse CSV");
    BracketLoader::load(&repo, &records)
        .await
        .expect("failed to load brackets");
    repo.upsert_payroll_config(&PayrollConfig::brazil_2025())
        .await
        .expect("failed to store payroll config");
    repo
}

#[tokio::test]
async fn load_all_2025_schedules() {
    let repo = seeded_repository().await;

    let ss = repo
        .get_brackets(Country::Brazil, TaxKind::SocialSecurity, 2025)
        .await
        .unwrap();
    let it = repo
        .get_brackets(Country::Brazil, TaxKind::IncomeTax, 2025)
        .await
        .unwrap();

    assert_eq!(ss.len(), 4);
    assert_eq!(it.len(), 5);

    // First social-security bracket (7.5%).
    assert_eq!(ss[0].min_amount, dec!(0));
    assert_eq!(ss[0].max_amount, Some(dec!(1518.00)));
    assert_eq!(ss[0].rate, dec!(0.075));

    // Top income-tax bracket is unbounded.
    assert_eq!(it[4].max_amount, None);
    assert_eq!(it[4].fixed_deduction, dec!(896.00));
}

#[tokio::test]
async fn reloading_replaces_rather_than_duplicates() {
    let repo = seeded_repository().await;
    let records = BracketLoader::parse(BRACKETS_BR_2025.as_bytes()).unwrap();

    BracketLoader::load(&repo, &records).await.unwrap();

    let ss = repo
        .get_brackets(Country::Brazil, TaxKind::SocialSecurity, 2025)
        .await
        .unwrap();
    assert_eq!(ss.len(), 4);
}

#[tokio::test]
async fn loaded_schedules_reproduce_the_salary_fixture() {
    let repo = seeded_repository().await;
    let ss = repo
        .get_brackets(Country::Brazil, TaxKind::SocialSecurity, 2025)
        .await
        .unwrap();
    let it = repo
        .get_brackets(Country::Brazil, TaxKind::IncomeTax, 2025)
        .await
        .unwrap();
    let config = repo
        .get_payroll_config(Country::Brazil, 2025)
        .await
        .unwrap();

    let calc = PayrollCalculator::new(&ss, &it, &config);
    let output = calc
        .calculate(&SalaryInput::from_gross(dec!(3000.00)))
        .unwrap();

    assert_eq!(output.social_security, dec!(253.41));
    assert_eq!(output.income_tax, dec!(36.55));
    assert_eq!(output.net_salary, dec!(2710.04));
}

#[tokio::test]
async fn scanned_document_to_stored_explanation() {
    let repo = seeded_repository().await;

    let text = "\
Acme Indústria Ltda
CNPJ: 12.345.678/0001-90
Competência: 01/2025
Funcionário: Maria Silva
Salário Bruto: R$ 3.000,00
INSS: 253,41
IRRF: 36,55
Total de Descontos: 289,96
Líquido a Receber: R$ 2.710,04";

    let record = scan_document(text, &[], Country::Brazil);
    assert_eq!(record.gross_salary, Some(dec!(3000.00)));

    let stored = repo.create_payslip(record).await.unwrap();
    let fetched = repo.get_payslip(stored.id).await.unwrap();

    let report = explain::generate(&fetched.record);
    assert!(report.summary.contains("3.000,00"), "{}", report.summary);
    assert!(report.summary.contains("2.710,04"), "{}", report.summary);
    assert!(report.observations.is_empty(), "{:?}", report.observations);
}
