//! Error types for detail extraction

use thiserror::Error;

/// Result type for the host-facing API
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to the host. Field-level problems never end up here,
/// they are recorded as diagnostics on the extraction result instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Request JSON could not be parsed
    #[error("Invalid request: {0}")]
    InvalidRequest(#[source] serde_json::Error),

    /// A mapping declared the same field name twice
    #[error("Duplicate field in mapping: {0}")]
    DuplicateField(String),

    /// Result could not be serialized
    #[error("Failed to serialize result: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// A transform was handed a value it cannot work with
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    #[error("expected {expected}, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },

    #[error("numeric overflow while rescaling {0}")]
    Overflow(i64),
}

impl TransformError {
    pub(crate) fn shape(expected: &'static str, found: &serde_json::Value) -> Self {
        TransformError::UnexpectedShape {
            expected,
            found: kind_of(found),
        }
    }
}

/// Short JSON kind name for messages
pub(crate) fn kind_of(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
