//! Locale-aware currency rendering for reports.

use rust_decimal::Decimal;

use crate::calculations::common::round_half_up;
use crate::models::Country;

/// Display separators per country (`1.234,56` for pt-BR).
fn separators(country: Country) -> (char, char) {
    match country {
        Country::Brazil | Country::Portugal => ('.', ','),
        Country::France => ('\u{a0}', ','),
    }
}

/// Renders an amount with exactly two decimals and the country's
/// thousands/decimal separators.
pub fn format_currency(amount: Decimal, country: Country) -> String {
    let (thousands, decimal) = separators(country);
    let value = round_half_up(amount);
    let negative = value < Decimal::ZERO;
    let text = value.abs().to_string();

    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (text, String::new()),
    };
    let mut cents = frac_part;
    cents.truncate(2);
    while cents.len() < 2 {
        cents.push('0');
    }

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::new();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(thousands);
        }
        grouped.push(*c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}{decimal}{cents}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn brazilian_grouping_and_decimal_comma() {
        assert_eq!(format_currency(dec!(3000), Country::Brazil), "3.000,00");
        assert_eq!(format_currency(dec!(2710.04), Country::Brazil), "2.710,04");
        assert_eq!(format_currency(dec!(1234567.89), Country::Brazil), "1.234.567,89");
    }

    #[test]
    fn small_amounts_have_no_grouping() {
        assert_eq!(format_currency(dec!(253.41), Country::Brazil), "253,41");
        assert_eq!(format_currency(dec!(0), Country::Brazil), "0,00");
    }

    #[test]
    fn french_grouping_uses_non_breaking_space() {
        assert_eq!(format_currency(dec!(2500), Country::France), "2\u{a0}500,00");
    }

    #[test]
    fn single_decimal_is_padded() {
        assert_eq!(format_currency(dec!(10.5), Country::Brazil), "10,50");
    }

    #[test]
    fn amounts_are_rounded_to_cents() {
        assert_eq!(format_currency(dec!(36.555), Country::Brazil), "36,56");
    }

    #[test]
    fn negative_amounts_keep_the_sign() {
        assert_eq!(format_currency(dec!(-12.30), Country::Brazil), "-12,30");
    }
}
