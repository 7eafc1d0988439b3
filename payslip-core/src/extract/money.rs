//! The single deterministic currency cleaner.
//!
//! Every money string in the pipeline goes through [`parse_money`],
//! parameterized by the country's separators. Cleaning strips currency
//! symbols and whitespace, drops thousands separators, converts the locale
//! decimal separator to a dot, and parses the result as a [`Decimal`]. A
//! string that survives none of that is a parse miss (`None`), never a
//! zero.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::models::Country;

/// Locale separators for money strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoneyFormat {
    /// Characters that may group thousands (`1.234,56`, `1 234,56`).
    pub thousands: &'static [char],
    pub decimal: char,
}

impl MoneyFormat {
    pub const fn for_country(country: Country) -> MoneyFormat {
        match country {
            Country::Brazil => MoneyFormat {
                thousands: &['.'],
                decimal: ',',
            },
            Country::Portugal => MoneyFormat {
                thousands: &['.', ' ', '\u{a0}'],
                decimal: ',',
            },
            Country::France => MoneyFormat {
                thousands: &[' ', '\u{a0}', '.'],
                decimal: ',',
            },
        }
    }
}

/// Cleans `raw` to a canonical dot-decimal string, or `None` when no
/// parseable amount remains.
pub fn clean_money(raw: &str, format: MoneyFormat) -> Option<String> {
    let mut cleaned = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_ascii_digit() {
            cleaned.push(c);
        } else if c == format.decimal {
            cleaned.push('.');
        } else if c == '-' && cleaned.is_empty() {
            cleaned.push('-');
        } else if format.thousands.contains(&c) || c.is_whitespace() {
            // Grouping noise, dropped.
        } else if c.is_alphabetic() || c == '$' || c == '€' || c == ':' {
            // Currency markers and label remnants, dropped.
        } else {
            return None;
        }
    }

    let has_digit = cleaned.chars().any(|c| c.is_ascii_digit());
    if !has_digit || cleaned.matches('.').count() > 1 {
        return None;
    }
    Some(cleaned)
}

/// Parses a raw money string into a [`Decimal`].
pub fn parse_money(raw: &str, format: MoneyFormat) -> Option<Decimal> {
    let cleaned = clean_money(raw, format)?;
    Decimal::from_str(&cleaned).ok()
}
