//! Per-field post-processing rules
//!
//! Every rule is a pure function from a resolved raw value to its final
//! shape. Unresolved paths are handed over as `null`, so a rule only ever
//! sees `null` or a concrete value.

mod numeric;
mod structure;
mod text;

pub use numeric::*;
pub use structure::*;
pub use text::*;

use crate::error::TransformError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Registered transform, referenced by name from a mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    /// HTML description to plain text
    DescriptionText,
    /// Price label, `"Free"` when empty
    PriceText,
    /// JavaScript-style truthiness to bool
    Truthy,
    /// Micro-units to a decimal amount
    Price,
    /// True only for a price of exactly zero
    Free,
    /// Identifier following `id=` in a developer URL
    DeveloperId,
    /// Leading version number, or `"VARY"`
    AndroidVersion,
    /// Image URLs out of screenshot nodes
    Screenshots,
    /// Star rating counts keyed 1 to 5
    Histogram,
    /// `{title, description}` pairs
    Features,
    /// First few non-null comment texts
    Comments,
    /// Epoch seconds to epoch milliseconds
    UpdatedMillis,
}

impl Transform {
    pub fn apply(self, value: &Value) -> Result<Value, TransformError> {
        match self {
            Transform::DescriptionText => description_text(value),
            Transform::PriceText => price_text(value),
            Transform::Truthy => Ok(Value::Bool(is_truthy(value))),
            Transform::Price => price(value),
            Transform::Free => free(value),
            Transform::DeveloperId => developer_id(value),
            Transform::AndroidVersion => android_version(value),
            Transform::Screenshots => screenshots(value),
            Transform::Histogram => histogram(value),
            Transform::Features => features(value),
            Transform::Comments => comments(value),
            Transform::UpdatedMillis => updated_millis(value),
        }
    }
}

/// JavaScript truthiness: `null`, `false`, zero and `""` are falsy.
/// Arrays and objects are truthy even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
