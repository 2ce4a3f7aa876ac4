//! Picks the root tree a field is read from

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::mapping::FieldSpec;

/// Separately fetched trees keyed by the service id that produced them
pub type SecondarySources = HashMap<String, Value>;

/// Root tree for `field`, or `None` when the secondary tree it needs was
/// not fetched.
///
/// Primary fields get the whole primary payload: the first segment of their
/// path selects the dataset partition, so a missing partition simply fails
/// to resolve. Secondary paths apply to the service tree directly.
pub fn select_source<'a>(
    field: &FieldSpec,
    primary: &'a Value,
    secondary: &'a SecondarySources,
) -> Option<&'a Value> {
    match field.secondary_key.as_deref() {
        None => Some(primary),
        Some(service) => {
            let tree = secondary.get(service);
            if tree.is_none() {
                debug!(field = %field.name, service, "secondary source not supplied");
            }
            tree
        }
    }
}
