//! Mapping-driven extraction
//!
//! Every field is processed on its own: a field whose source or path is
//! missing falls back to its rule's default, and a rule that rejects its
//! input leaves the field `null` with a [`Diagnostic`]. Nothing aborts the
//! whole record, so the result always carries every declared field.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::{trace, warn};

use crate::error::TransformError;
use crate::mapping::{details_mapping, FieldSpec, MappingSpec};
use crate::path::{display_path, resolve};
use crate::router::{select_source, SecondarySources};
use crate::transforms::Transform;

/// A field whose rule failed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub field: String,
    pub transform: Transform,
    #[serde(rename = "message", serialize_with = "serialize_display")]
    pub error: TransformError,
}

fn serialize_display<S: Serializer>(error: &TransformError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Output of one extraction
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractionResult {
    /// Field name to final value, one entry per declared field
    pub values: Map<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl ExtractionResult {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// True when no rule rejected its input
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_values(self) -> Map<String, Value> {
        self.values
    }
}

/// Runs a mapping against a primary payload and optional secondary trees
#[derive(Debug, Clone, Copy)]
pub struct Extractor<'s> {
    spec: &'s MappingSpec,
}

impl<'s> Extractor<'s> {
    pub fn new(spec: &'s MappingSpec) -> Self {
        Extractor { spec }
    }

    pub fn spec(&self) -> &'s MappingSpec {
        self.spec
    }

    pub fn extract(&self, primary: &Value, secondary: &SecondarySources) -> ExtractionResult {
        let mut result = ExtractionResult::default();

        for field in self.spec.fields() {
            let value = match extract_field(field, primary, secondary) {
                Ok(value) => value,
                Err(error) => {
                    warn!(field = %field.name, %error, "transform failed, field left null");
                    if let Some(transform) = field.transform {
                        result.diagnostics.push(Diagnostic {
                            field: field.name.clone(),
                            transform,
                            error,
                        });
                    }
                    Value::Null
                }
            };
            result.values.insert(field.name.clone(), value);
        }

        result
    }
}

/// Extract with the built-in app details mapping
pub fn extract_details(primary: &Value, secondary: &SecondarySources) -> ExtractionResult {
    Extractor::new(details_mapping()).extract(primary, secondary)
}

fn extract_field(
    field: &FieldSpec,
    primary: &Value,
    secondary: &SecondarySources,
) -> Result<Value, TransformError> {
    let raw = select_source(field, primary, secondary).and_then(|root| resolve(root, &field.path));

    let raw = raw.unwrap_or_else(|| {
        trace!(field = %field.name, path = %display_path(&field.path), "path unavailable");
        &Value::Null
    });

    match field.transform {
        Some(transform) => transform.apply(raw),
        None => Ok(raw.clone()),
    }
}
