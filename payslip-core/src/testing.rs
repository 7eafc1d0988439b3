//! Shared bracket fixtures for unit tests: the Brazilian 2025 schedules.

use rust_decimal_macros::dec;

use crate::models::{Country, TaxBracket, TaxKind};

pub fn inss_2025() -> Vec<TaxBracket> {
    let rows = [
        (dec!(0), Some(dec!(1518.00)), dec!(0.075)),
        (dec!(1518.00), Some(dec!(2793.88)), dec!(0.09)),
        (dec!(2793.88), Some(dec!(4190.83)), dec!(0.12)),
        (dec!(4190.83), Some(dec!(8157.41)), dec!(0.14)),
    ];
    rows.into_iter()
        .map(|(min, max, rate)| TaxBracket {
            country: Country::Brazil,
            kind: TaxKind::SocialSecurity,
            year: 2025,
            min_amount: min,
            max_amount: max,
            rate,
            fixed_deduction: dec!(0),
            active: true,
        })
        .collect()
}

pub fn irrf_2025() -> Vec<TaxBracket> {
    let rows = [
        (dec!(0), Some(dec!(2259.20)), dec!(0), dec!(0)),
        (dec!(2259.20), Some(dec!(2826.65)), dec!(0.075), dec!(169.44)),
        (dec!(2826.65), Some(dec!(3751.05)), dec!(0.15), dec!(381.44)),
        (dec!(3751.05), Some(dec!(4664.68)), dec!(0.225), dec!(662.77)),
        (dec!(4664.68), None, dec!(0.275), dec!(896.00)),
    ];
    rows.into_iter()
        .map(|(min, max, rate, deduction)| TaxBracket {
            country: Country::Brazil,
            kind: TaxKind::IncomeTax,
            year: 2025,
            min_amount: min,
            max_amount: max,
            rate,
            fixed_deduction: deduction,
            active: true,
        })
        .collect()
}
