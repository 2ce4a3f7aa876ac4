//! Nested path traversal over loosely-typed trees
//!
//! Paths are plain data: an ordered list of array indices and object keys.
//! Traversal never fails loudly; anything that cannot be followed resolves to
//! `None`, while an explicit `null` sitting at the end of the path comes back
//! as `Some(&Value::Null)`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One step of a path: a list index or a map key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(i) => write!(f, "[{}]", i),
            PathSegment::Key(k) => write!(f, "[{:?}]", k),
        }
    }
}

/// Build a `Vec<PathSegment>` from mixed key and index literals.
///
/// ```
/// use details_parser::{path, PathSegment};
///
/// let p = path!["ds:6", 0, 12];
/// assert_eq!(p[0], PathSegment::Key("ds:6".to_string()));
/// assert_eq!(p[2], PathSegment::Index(12));
/// ```
#[macro_export]
macro_rules! path {
    ($($segment:expr),* $(,)?) => {
        vec![$($crate::PathSegment::from($segment)),*]
    };
}

/// Walk `path` from `tree`.
///
/// Returns `None` when a segment cannot be followed: index out of bounds,
/// index into a non-array, key missing or looked up on a non-object, or any
/// step taken past a `null`.
pub fn resolve<'a>(tree: &'a Value, path: &[PathSegment]) -> Option<&'a Value> {
    path.iter().try_fold(tree, |node, segment| match (segment, node) {
        (PathSegment::Index(i), Value::Array(items)) => items.get(*i),
        (PathSegment::Key(k), Value::Object(map)) => map.get(k),
        _ => None,
    })
}

/// Render a path for log output, e.g. `["ds:6"][0][12]`
pub fn display_path(path: &[PathSegment]) -> String {
    path.iter().map(|s| s.to_string()).collect()
}
