//! Lenient readers for prop values.
//!
//! Props arrive from hand-edited JSON and from three different editors, so a
//! font size may show up as `16`, `16.0` or `"16"`. Renderers read through
//! these helpers instead of matching on `Value` directly.

use serde_json::Value;

/// Read a number, accepting numeric strings.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Read a string, rendering scalars as text.
pub fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(&json!(16)), Some(16.0));
        assert_eq!(coerce_number(&json!(12.5)), Some(12.5));
        assert_eq!(coerce_number(&json!("24")), Some(24.0));
        assert_eq!(coerce_number(&json!(" 18.5 ")), Some(18.5));
        assert_eq!(coerce_number(&json!("large")), None);
        assert_eq!(coerce_number(&json!("NaN")), None);
        assert_eq!(coerce_number(&json!(null)), None);
        assert_eq!(coerce_number(&json!(true)), None);
    }

    #[test]
    fn test_coerce_string() {
        assert_eq!(coerce_string(&json!("hi")), Some("hi".to_string()));
        assert_eq!(coerce_string(&json!(3)), Some("3".to_string()));
        assert_eq!(coerce_string(&json!(false)), Some("false".to_string()));
        assert_eq!(coerce_string(&json!({})), None);
    }
}
