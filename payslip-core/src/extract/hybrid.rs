//! The regex-then-entity fallback chain.
//!
//! OCR text layout is unreliable (column bleed, multi-page duplication);
//! document-AI entities are higher-precision but not always present or
//! complete. Each field therefore tries the text first and falls back to
//! the entity list, preferring the most precise source available:
//!
//! 1. scan the text lines top to bottom and return the first capture-group
//!    match (first-match-wins, not best-match);
//! 2. otherwise return the first entity whose type label contains any of
//!    the candidate substrings, case-insensitively, in candidate order;
//! 3. a positional heuristic exists as a last resort for the employer name
//!    only.
//!
//! A field that misses every source is simply absent — a financial figure
//! is never guessed or defaulted.

use regex::Regex;
use tracing::debug;

/// A structured entity from a document-AI service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// The service's type label, e.g. `net_amount` or `supplier_name`.
    pub type_name: String,
    pub text: String,
}

impl Entity {
    pub fn new(type_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            text: text.into(),
        }
    }
}

/// Which source produced a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldSource {
    Regex,
    Entity,
    Heuristic,
}

/// A located field value and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldHit {
    pub value: String,
    pub source: FieldSource,
}

/// Locates one field in the document.
///
/// The optional `cleaner` is applied to whichever value was found,
/// regardless of source; a cleaner miss makes the whole field a miss
/// (logged, not an error).
pub fn extract_field(
    lines: &[&str],
    pattern: &Regex,
    entity_types: &[&str],
    entities: &[Entity],
    cleaner: Option<&dyn Fn(&str) -> Option<String>>,
) -> Option<FieldHit> {
    let hit = regex_pass(lines, pattern)
        .map(|value| FieldHit {
            value,
            source: FieldSource::Regex,
        })
        .or_else(|| {
            entity_pass(entity_types, entities).map(|value| FieldHit {
                value,
                source: FieldSource::Entity,
            })
        })?;

    match cleaner {
        None => Some(hit),
        Some(clean) => match clean(&hit.value) {
            Some(value) => Some(FieldHit { value, ..hit }),
            None => {
                debug!(raw = %hit.value, "cleaner rejected extracted value");
                None
            }
        },
    }
}

/// First capture-group match over the lines, top to bottom.
fn regex_pass(lines: &[&str], pattern: &Regex) -> Option<String> {
    lines.iter().find_map(|line| {
        pattern
            .captures(line)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
    })
}

/// First entity whose type label contains a candidate substring,
/// case-insensitively, honoring candidate priority order.
fn entity_pass(entity_types: &[&str], entities: &[Entity]) -> Option<String> {
    entity_types.iter().find_map(|candidate| {
        let candidate = candidate.to_lowercase();
        entities
            .iter()
            .find(|e| e.type_name.to_lowercase().contains(&candidate))
            .map(|e| e.text.trim().to_string())
    })
}

/// Last-resort employer-name heuristic: the non-empty line immediately
/// above the employer tax-id line (or below it, when the tax id opens the
/// document). Tried only after regex and entity lookup both miss, and only
/// for the employer-name field.
pub fn employer_near_tax_id(lines: &[&str], tax_id_pattern: &Regex) -> Option<String> {
    let index = lines.iter().position(|line| tax_id_pattern.is_match(line))?;

    let above = lines[..index]
        .iter()
        .rev()
        .map(|l| l.trim())
        .find(|l| !l.is_empty());
    let below = lines[index + 1..]
        .iter()
        .map(|l| l.trim())
        .find(|l| !l.is_empty());

    above.or(below).map(str::to_string)
}
