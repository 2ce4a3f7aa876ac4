//! String rules: labels, identifiers and version strings

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::TransformError;
use crate::markup::html_to_text;

use super::is_truthy;

/// Label shown when no price text is present
pub const FREE_LABEL: &str = "Free";

/// Android version reported when the requirement depends on the device
pub const VARIES_WITH_DEVICE: &str = "VARY";

const DEVELOPER_ID_MARKER: &str = "id=";

static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").expect("valid numeric prefix regex")
});

/// HTML description to plain text with line breaks preserved
pub fn description_text(value: &Value) -> Result<Value, TransformError> {
    match value {
        Value::Null => Ok(Value::Null),
        Value::String(html) => Ok(Value::String(html_to_text(html))),
        other => Err(TransformError::shape("string", other)),
    }
}

pub fn price_text(value: &Value) -> Result<Value, TransformError> {
    if is_truthy(value) {
        Ok(value.clone())
    } else {
        Ok(Value::String(FREE_LABEL.to_string()))
    }
}

/// The part of a developer page URL between the first and second `id=`
pub fn developer_id(value: &Value) -> Result<Value, TransformError> {
    match value {
        Value::Null => Ok(Value::Null),
        Value::String(url) => Ok(url
            .split(DEVELOPER_ID_MARKER)
            .nth(1)
            .map_or(Value::Null, |id| Value::String(id.to_string()))),
        other => Err(TransformError::shape("string", other)),
    }
}

/// `"4.1 and up"` becomes `"4.1"`; text without a usable leading number
/// becomes [`VARIES_WITH_DEVICE`].
pub fn android_version(value: &Value) -> Result<Value, TransformError> {
    let text = match value {
        Value::Null => return Ok(Value::Null),
        Value::String(s) => s,
        other => return Err(TransformError::shape("string", other)),
    };

    let token = text.split(' ').next().unwrap_or_default();
    let version = match leading_number(token) {
        Some(n) if n != 0.0 => token,
        _ => VARIES_WITH_DEVICE,
    };

    Ok(Value::String(version.to_string()))
}

/// Parse the longest numeric prefix of `s`, like a lenient float parser:
/// `"4.4W"` gives 4.4, `"Varies"` gives nothing.
fn leading_number(s: &str) -> Option<f64> {
    NUMERIC_PREFIX
        .find(s.trim_start())
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_android_version() {
        assert_eq!(android_version(&json!("4.1 and up")).unwrap(), json!("4.1"));
        assert_eq!(android_version(&json!("5.0")).unwrap(), json!("5.0"));
        assert_eq!(android_version(&json!("4.4W and up")).unwrap(), json!("4.4W"));
        assert_eq!(android_version(&json!("Varies with device")).unwrap(), json!("VARY"));
        assert_eq!(android_version(&json!("0 and up")).unwrap(), json!("VARY"));
        assert_eq!(android_version(&json!("")).unwrap(), json!("VARY"));
        assert_eq!(android_version(&json!(null)).unwrap(), json!(null));
        assert!(android_version(&json!(4.1)).is_err());
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("4.1"), Some(4.1));
        assert_eq!(leading_number("7."), Some(7.0));
        assert_eq!(leading_number(".5x"), Some(0.5));
        assert_eq!(leading_number("-2e3km"), Some(-2000.0));
        assert_eq!(leading_number("1e"), Some(1.0));
        assert_eq!(leading_number("."), None);
        assert_eq!(leading_number("-"), None);
        assert_eq!(leading_number("abc"), None);
    }

    #[test]
    fn test_developer_id() {
        let url = "https://play.google.com/store/apps/dev?id=5700313618786177705";
        assert_eq!(developer_id(&json!(url)).unwrap(), json!("5700313618786177705"));
        assert_eq!(
            developer_id(&json!("/store/apps/developer?id=Example+Studio")).unwrap(),
            json!("Example+Studio")
        );
        assert_eq!(developer_id(&json!("https://example.com/no-query")).unwrap(), json!(null));
        assert_eq!(developer_id(&json!(null)).unwrap(), json!(null));
        assert_eq!(
            developer_id(&json!(["not", "a", "url"])),
            Err(TransformError::UnexpectedShape { expected: "string", found: "array" })
        );
    }

    #[test]
    fn test_price_text() {
        assert_eq!(price_text(&json!("$2.99")).unwrap(), json!("$2.99"));
        assert_eq!(price_text(&json!("")).unwrap(), json!("Free"));
        assert_eq!(price_text(&json!(null)).unwrap(), json!("Free"));
    }

    #[test]
    fn test_description_text() {
        let html = "Track your runs.<br><br><b>Features</b><br>&bull; GPS maps";
        assert_eq!(
            description_text(&json!(html)).unwrap(),
            json!("Track your runs.\n\nFeatures\n\u{2022} GPS maps")
        );
        assert_eq!(description_text(&json!(null)).unwrap(), json!(null));
        assert!(description_text(&json!(42)).is_err());
    }
}
