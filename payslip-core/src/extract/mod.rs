//! Hybrid field extraction over OCR text and document-AI entities.

pub mod fields;
pub mod hybrid;
pub mod money;

pub use fields::{FieldSpec, extract_raw_fields, scan_document};
pub use hybrid::{Entity, FieldHit, FieldSource, employer_near_tax_id, extract_field};
pub use money::{MoneyFormat, clean_money, parse_money};
