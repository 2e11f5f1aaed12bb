//! `application/x-www-form-urlencoded` request bodies

use serde_json::{Number, Value};
use url::form_urlencoded;

use crate::error::TransportError;

/// Content type of an encoded form body
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Encode form parameters as an urlencoded body
///
/// Nested objects and arrays use bracket notation (`baz[boo]=qux`,
/// `ids[0]=1`), booleans are sent as `1`/`0` and `null` members are
/// skipped. The top-level value must be an object; `null` encodes to an
/// empty body.
pub fn encode_form(params: &Value) -> Result<String, TransportError> {
    let object = match params {
        Value::Object(object) => object,
        Value::Null => return Ok(String::new()),
        other => {
            return Err(TransportError::Serialization(format!(
                "form parameters must be a mapping, got {}",
                kind(other)
            )))
        }
    };

    let mut pairs = Vec::new();
    for (key, value) in object {
        flatten(key.clone(), value, &mut pairs);
    }

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in &pairs {
        serializer.append_pair(key, value);
    }
    Ok(serializer.finish())
}

fn flatten(prefix: String, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Bool(flag) => pairs.push((prefix, if *flag { "1" } else { "0" }.to_string())),
        Value::Number(number) => pairs.push((prefix, format_number(number))),
        Value::String(text) => pairs.push((prefix, text.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten(format!("{prefix}[{index}]"), item, pairs);
            }
        }
        Value::Object(object) => {
            for (key, item) in object {
                flatten(format!("{prefix}[{key}]"), item, pairs);
            }
        }
    }
}

/// Floats with an integral value are sent without a fractional part
fn format_number(number: &Number) -> String {
    match number.as_f64() {
        Some(float) if number.is_f64() => float.to_string(),
        _ => number.to_string(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_nested_mapping() {
        let body = encode_form(&json!({"foo": "bar bam", "baz": {"boo": "qux"}}))
            .expect("valid form");
        assert_eq!(body, "foo=bar+bam&baz%5Bboo%5D=qux");
    }

    #[test]
    fn test_scalars() {
        let body = encode_form(&json!({"a": 1, "b": true, "c": false, "d": null, "e": 1.5}))
            .expect("valid form");
        assert_eq!(body, "a=1&b=1&c=0&e=1.5");
    }

    #[test]
    fn test_integral_floats_drop_fraction() {
        let body = encode_form(&json!({"a": 1.0, "b": -2.0, "c": 0.25, "d": 42}))
            .expect("valid form");
        assert_eq!(body, "a=1&b=-2&c=0.25&d=42");
    }

    #[test]
    fn test_arrays_use_indices() {
        let body = encode_form(&json!({"ids": [7, 8]})).expect("valid form");
        assert_eq!(body, "ids%5B0%5D=7&ids%5B1%5D=8");
    }

    #[test]
    fn test_deep_nesting() {
        let body = encode_form(&json!({"a": {"b": {"c": "d&e"}}})).expect("valid form");
        assert_eq!(body, "a%5Bb%5D%5Bc%5D=d%26e");
    }

    #[test]
    fn test_empty_params() {
        assert_eq!(encode_form(&json!({})).expect("valid form"), "");
        assert_eq!(encode_form(&Value::Null).expect("valid form"), "");
    }

    #[test]
    fn test_rejects_non_mapping() {
        let result = encode_form(&json!(["foo"]));
        match result {
            Err(TransportError::Serialization(msg)) => assert!(msg.contains("array")),
            _ => panic!("Expected TransportError::Serialization"),
        }
    }
}
