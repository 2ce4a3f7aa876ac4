//! Structural rules: reshaping nested lists into output lists and maps

use crate::error::TransformError;
use crate::path::{resolve, PathSegment};
use serde_json::{json, Map, Value};

use super::is_truthy;

/// Most comments kept from a comment listing
pub const MAX_COMMENTS: usize = 5;

const SCREENSHOT_URL: &[PathSegment] = &[PathSegment::Index(3), PathSegment::Index(2)];
const FEATURE_LIST: &[PathSegment] = &[PathSegment::Index(2)];
const FEATURE_TITLE: &[PathSegment] = &[PathSegment::Index(0)];
const FEATURE_DESCRIPTION: &[PathSegment] = &[
    PathSegment::Index(1),
    PathSegment::Index(0),
    PathSegment::Index(0),
    PathSegment::Index(1),
];
const COMMENT_TEXT: &[PathSegment] = &[PathSegment::Index(4)];

fn resolve_or_null(node: &Value, path: &[PathSegment]) -> Value {
    resolve(node, path).cloned().unwrap_or(Value::Null)
}

/// Image URL of every screenshot node, in order
pub fn screenshots(value: &Value) -> Result<Value, TransformError> {
    match value {
        Value::Null => Ok(json!([])),
        Value::Array(nodes) => Ok(nodes
            .iter()
            .map(|node| resolve_or_null(node, SCREENSHOT_URL))
            .collect()),
        other => Err(TransformError::shape("array", other)),
    }
}

/// Star histogram from a container whose slots 1 to 5 hold `[label, count]`
pub fn histogram(value: &Value) -> Result<Value, TransformError> {
    let mut buckets = Map::new();

    if !is_truthy(value) {
        for star in 1..=5 {
            buckets.insert(star.to_string(), json!(0));
        }
        return Ok(Value::Object(buckets));
    }

    let Value::Array(slots) = value else {
        return Err(TransformError::shape("array", value));
    };

    for star in 1..=5usize {
        let slot = slots.get(star).unwrap_or(&Value::Null);
        let count = match slot {
            Value::Array(pair) => pair.get(1),
            _ => None,
        }
        .ok_or_else(|| TransformError::shape("[label, count] pair", slot))?;

        buckets.insert(star.to_string(), count.clone());
    }

    Ok(Value::Object(buckets))
}

/// `{title, description}` for each entry of the feature list at slot 2
pub fn features(value: &Value) -> Result<Value, TransformError> {
    let entries = match resolve(value, FEATURE_LIST) {
        Some(list) if is_truthy(list) => list,
        _ => return Ok(json!([])),
    };

    let Value::Array(entries) = entries else {
        return Err(TransformError::shape("array", entries));
    };

    Ok(entries
        .iter()
        .map(|entry| {
            json!({
                "title": resolve_or_null(entry, FEATURE_TITLE),
                "description": resolve_or_null(entry, FEATURE_DESCRIPTION),
            })
        })
        .collect())
}

/// Text column of each comment row, skipping rows without text, capped at
/// [`MAX_COMMENTS`]
pub fn comments(value: &Value) -> Result<Value, TransformError> {
    if !is_truthy(value) {
        return Ok(json!([]));
    }

    let Value::Array(rows) = value else {
        return Err(TransformError::shape("array", value));
    };

    Ok(rows
        .iter()
        .filter_map(|row| resolve(row, COMMENT_TEXT))
        .filter(|text| !text.is_null())
        .take(MAX_COMMENTS)
        .cloned()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_defaults_to_zero() {
        let zeros = json!({"1": 0, "2": 0, "3": 0, "4": 0, "5": 0});
        assert_eq!(histogram(&json!(null)).unwrap(), zeros);
        assert_eq!(histogram(&json!(0)).unwrap(), zeros);
    }

    #[test]
    fn test_histogram_reads_one_indexed_pairs() {
        let raw = json!([null, [1, 120], [2, 30], [3, 9], [4, 4], [5, 900]]);
        assert_eq!(
            histogram(&raw).unwrap(),
            json!({"1": 120, "2": 30, "3": 9, "4": 4, "5": 900})
        );
    }

    #[test]
    fn test_histogram_rejects_short_container() {
        let raw = json!([null, [1, 120], [2, 30]]);
        assert_eq!(
            histogram(&raw),
            Err(TransformError::UnexpectedShape { expected: "[label, count] pair", found: "null" })
        );
        assert!(histogram(&json!("stars")).is_err());
    }

    #[test]
    fn test_screenshots() {
        assert_eq!(screenshots(&json!(null)).unwrap(), json!([]));

        let raw = json!([
            [null, 2, [1080, 1920], [null, null, "https://img.example/a.png"]],
            [null, 2, [1080, 1920], [null, null, "https://img.example/b.png"]],
            [null, 2, [1080, 1920]]
        ]);
        assert_eq!(
            screenshots(&raw).unwrap(),
            json!(["https://img.example/a.png", "https://img.example/b.png", null])
        );
        assert!(screenshots(&json!({"a": 1})).is_err());
    }

    #[test]
    fn test_features() {
        assert_eq!(features(&json!(null)).unwrap(), json!([]));
        assert_eq!(features(&json!([null, null, null])).unwrap(), json!([]));

        let raw = json!([
            null,
            null,
            [
                ["Offline mode", [[[null, "Works without a connection"]]]],
                ["Family library", [[[null, "Share with up to 5 family members"]]]]
            ]
        ]);
        assert_eq!(
            features(&raw).unwrap(),
            json!([
                {"title": "Offline mode", "description": "Works without a connection"},
                {"title": "Family library", "description": "Share with up to 5 family members"}
            ])
        );
    }

    #[test]
    fn test_comments_skip_null_text_and_cap() {
        let rows: Vec<Value> = (1..=7)
            .map(|i| {
                let text = if i == 3 || i == 6 { Value::Null } else { json!(format!("comment {i}")) };
                json!([format!("id{i}"), "author", null, 5, text])
            })
            .collect();

        assert_eq!(
            comments(&Value::Array(rows)).unwrap(),
            json!(["comment 1", "comment 2", "comment 4", "comment 5", "comment 7"])
        );
    }

    #[test]
    fn test_comments_empty_and_short_rows() {
        assert_eq!(comments(&json!(null)).unwrap(), json!([]));
        assert_eq!(comments(&json!([[1, 2], ["a", "b", "c", "d", "kept"]])).unwrap(), json!(["kept"]));
        assert!(comments(&json!("rows")).is_err());
    }
}
