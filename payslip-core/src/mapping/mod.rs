//! Country-aware field mapping and normalization.
//!
//! Raw extraction output keeps the source document's field names; this
//! module resolves them onto the canonical schema through per-country alias
//! tables, coerces values, and scores completeness.

pub mod aliases;
pub mod fields;
pub mod normalize;
pub mod weights;

pub use aliases::{aliases, applicable};
pub use fields::{CanonicalField, FieldValue};
pub use normalize::{RawFields, normalize_raw_fields};
pub use weights::{extraction_confidence, weight};
