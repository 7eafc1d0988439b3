//! Raw-to-canonical normalization.
//!
//! Takes the flat raw map an extraction pass produced (keys in the source
//! document's language) and resolves it onto a [`PayslipExtracted`] through
//! the country's alias table. Missing and unparseable values become `None`;
//! neither is an error, and neither is ever conflated with zero.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::warn;

use crate::extract::money::{MoneyFormat, parse_money};
use crate::models::{Country, PayslipExtracted};

use super::aliases::aliases;
use super::fields::{CanonicalField, FieldValue};
use super::weights::extraction_confidence;

/// A raw extraction output: field name in the source language → value.
/// Ordered so that normalization (and its logs) are reproducible.
pub type RawFields = BTreeMap<String, Value>;

/// Builds the canonical record for `raw` extracted from a `country` payslip.
///
/// For each canonical field the country's synonym list is walked in order
/// and the first key present with a non-empty value wins — even when its
/// value turns out unparseable (first-match, not best-match). Fields the
/// country does not have normalize to `None`. The returned record carries
/// the computed extraction confidence and a fresh timestamp.
pub fn normalize_raw_fields(raw: &RawFields, country: Country) -> PayslipExtracted {
    let mut record = PayslipExtracted::empty(country);
    let format = MoneyFormat::for_country(country);

    for field in CanonicalField::ALL {
        let Some((key, value)) = first_present(raw, aliases(country, field)) else {
            continue;
        };
        match coerce(field, value, format) {
            Some(coerced) => field.assign(&mut record, coerced),
            None => {
                warn!(
                    field = field.as_str(),
                    raw_key = key,
                    "raw value did not coerce, leaving field unknown"
                );
            }
        }
    }

    record.confidence = extraction_confidence(&record);
    record
}

/// First synonym present in `raw` with a non-empty value.
fn first_present<'a>(
    raw: &'a RawFields,
    synonyms: &[&'static str],
) -> Option<(&'static str, &'a Value)> {
    synonyms.iter().find_map(|key| {
        let value = raw.get(*key)?;
        let empty = match value {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            _ => false,
        };
        (!empty).then_some((*key, value))
    })
}

fn coerce(field: CanonicalField, value: &Value, format: MoneyFormat) -> Option<FieldValue> {
    if field.is_monetary() {
        coerce_money(value, format).map(FieldValue::Money)
    } else {
        match value {
            Value::String(s) => Some(FieldValue::Text(s.trim().to_string())),
            Value::Number(n) => Some(FieldValue::Text(n.to_string())),
            _ => None,
        }
    }
}

/// Coerces a raw value to a non-negative amount. Negative amounts are
/// treated as a miss — a canonical financial field is never negative.
fn coerce_money(value: &Value, format: MoneyFormat) -> Option<Decimal> {
    let amount = match value {
        Value::String(s) => parse_money(s, format)?,
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Decimal::from(i)
            } else {
                Decimal::try_from(n.as_f64()?).ok()?
            }
        }
        _ => return None,
    };
    (amount >= Decimal::ZERO).then_some(amount)
}
