//! HTTP response handling

use hyper::ext::ReasonPhrase;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::{Map, Value};

use crate::error::{Error, TransportError};

/// Media type a response must carry to be decoded
pub const JSON_MEDIA_TYPE: &str = "application/json";

const TRIMMED: &[char] = &['"', '\'', ' ', '\n', '\t', '\r'];

/// Raw HTTP response with status code, headers and body
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: u16,
    reason: String,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl RawResponse {
    /// Create a new RawResponse with the canonical reason phrase of `status`
    pub fn new(status: u16, headers: HeaderMap, body: Vec<u8>) -> Self {
        let reason = StatusCode::from_u16(status)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or_default()
            .to_string();

        Self {
            status,
            reason,
            headers,
            body,
        }
    }

    /// Replace the reason phrase
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// Read the full response from the transport
    ///
    /// A reason phrase other than the canonical one is kept as sent.
    pub(crate) async fn from_reqwest(response: reqwest::Response) -> Result<Self, TransportError> {
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let reason = response
            .extensions()
            .get::<ReasonPhrase>()
            .map(|reason| String::from_utf8_lossy(reason.as_bytes()).into_owned());
        let body = response.bytes().await?.to_vec();

        let raw = Self::new(status, headers, body);
        Ok(match reason {
            Some(reason) => raw.with_reason(reason),
            None => raw,
        })
    }

    /// Get the HTTP status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Get the HTTP reason phrase
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Get the response headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the response body
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Check if the response status is a client or server error (4xx/5xx)
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }

    /// All values of a header joined with `", "`
    pub fn header_line(&self, name: &str) -> String {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Primary media type of a `Content-Type` header line
///
/// Empty comma separated values are skipped. Within the first remaining
/// value the first `;` separated token that is not a `key=value`
/// parameter, trimmed of whitespace and quotes, is the media type. Returns
/// `None` when no such token exists.
pub fn primary_media_type(header: &str) -> Option<&str> {
    let mut values = header
        .split(',')
        .map(|value| {
            value
                .split(';')
                .map(|token| token.trim_matches(TRIMMED))
                .filter(|token| !token.is_empty())
        })
        .filter_map(|mut tokens| {
            let first = tokens.next()?;
            Some(std::iter::once(first).chain(tokens))
        });

    values.next()?.find(|token| !token.contains('='))
}

/// Whether a decoded JSON value counts as empty
///
/// `null`, `false`, zero, `""`, `"0"`, `[]` and `{}` are all empty.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64().map_or(false, |n| n == 0.0),
        Value::String(text) => text.is_empty() || text == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(object) => object.is_empty(),
    }
}

/// Decode a JSON response or fail with [`Error::Network`]
///
/// The status code is not consulted: any response without an
/// `application/json` content type is an error, any response with one is
/// decoded. Empty, undecodable or falsy bodies yield an empty object.
pub fn parse_response(response: RawResponse) -> Result<Value, Error> {
    let content_type = response.header_line(CONTENT_TYPE.as_str());

    if primary_media_type(&content_type) != Some(JSON_MEDIA_TYPE) {
        tracing::warn!(
            status = response.status,
            content_type = %content_type,
            "Rejecting non-JSON response"
        );
        return Err(Error::Network {
            reason: response.reason,
            status: response.status,
        });
    }

    let value = serde_json::from_slice::<Value>(response.body()).unwrap_or_else(|err| {
        tracing::debug!("Undecodable JSON body: {}", err);
        Value::Null
    });

    if is_falsy(&value) {
        Ok(Value::Object(Map::new()))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;
    use serde_json::json;

    use super::*;

    fn response(status: u16, content_type: Option<&str>, body: &str) -> RawResponse {
        let mut headers = HeaderMap::new();
        if let Some(content_type) = content_type {
            headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_str(content_type).expect("valid header"),
            );
        }
        RawResponse::new(status, headers, body.as_bytes().to_vec())
    }

    #[test]
    fn test_primary_media_type() {
        assert_eq!(primary_media_type("application/json"), Some("application/json"));
        assert_eq!(
            primary_media_type("application/json; charset=utf-8"),
            Some("application/json")
        );
        assert_eq!(primary_media_type(" \"text/html\" ;q=1"), Some("text/html"));
        assert_eq!(
            primary_media_type("application/json, text/plain"),
            Some("application/json")
        );
        assert_eq!(primary_media_type(""), None);
        assert_eq!(primary_media_type(" , "), None);
        assert_eq!(primary_media_type("charset=utf-8"), None);
        assert_eq!(primary_media_type("charset=utf-8, application/json"), None);
    }

    #[test]
    fn test_primary_media_type_skips_parameters_and_empty_values() {
        assert_eq!(
            primary_media_type("charset=utf-8; application/json"),
            Some("application/json")
        );
        assert_eq!(primary_media_type(", application/json"), Some("application/json"));
        assert_eq!(
            primary_media_type(" ;, ; application/json; charset=utf-8"),
            Some("application/json")
        );
    }

    #[test]
    fn test_parameter_first_json_is_decoded() {
        let value = parse_response(response(
            200,
            Some("charset=utf-8; application/json"),
            r#"{"id":1}"#,
        ))
        .expect("json response");
        assert_eq!(value, json!({"id": 1}));
    }

    #[test]
    fn test_reason_phrase() {
        assert_eq!(response(200, None, "").reason(), "OK");
        assert_eq!(response(404, None, "").reason(), "Not Found");
        assert_eq!(response(599, None, "").reason(), "");
    }

    #[test]
    fn test_with_reason() {
        let raw = response(200, None, "").with_reason("Maintenance Mode");
        assert_eq!(raw.reason(), "Maintenance Mode");
        assert_eq!(raw.status(), 200);
    }

    #[test]
    fn test_network_error_keeps_custom_reason() {
        let raw = response(200, Some("text/html"), "").with_reason("Maintenance Mode");
        match parse_response(raw) {
            Err(Error::Network { reason, status }) => {
                assert_eq!(reason, "Maintenance Mode");
                assert_eq!(status, 200);
            }
            other => panic!("Expected Error::Network, got {:?}", other),
        }
    }

    #[test]
    fn test_status_helpers() {
        assert!(!response(204, None, "").is_error());
        assert!(response(404, None, "").is_error());
        assert!(response(500, None, "").is_error());
    }

    #[test]
    fn test_parse_json_body() {
        let value = parse_response(response(200, Some("application/json"), r#"{"data":[]}"#))
            .expect("json response");
        assert_eq!(value, json!({"data": []}));
    }

    #[test]
    fn test_parse_json_with_charset() {
        let value = parse_response(response(
            200,
            Some("application/json; charset=utf-8"),
            r#"{"id":1}"#,
        ))
        .expect("json response");
        assert_eq!(value, json!({"id": 1}));
    }

    #[test]
    fn test_json_error_status_is_decoded() {
        let value = parse_response(response(
            404,
            Some("application/json"),
            r#"{"code":404,"message":"Not Found"}"#,
        ))
        .expect("json response");
        assert_eq!(value["code"], 404);
    }

    // Falsy payloads collapse to an empty object rather than failing.
    #[test]
    fn test_falsy_bodies_collapse_to_empty_object() {
        for body in ["", "null", "false", "0", "0.0", "\"\"", "\"0\"", "[]", "{}", "not json"] {
            let value = parse_response(response(200, Some("application/json"), body))
                .expect("json response");
            assert_eq!(value, json!({}), "body {:?}", body);
        }
    }

    #[test]
    fn test_truthy_scalars_kept() {
        let value = parse_response(response(200, Some("application/json"), "[1,2]"))
            .expect("json response");
        assert_eq!(value, json!([1, 2]));

        let value = parse_response(response(200, Some("application/json"), "true"))
            .expect("json response");
        assert_eq!(value, json!(true));
    }

    #[test]
    fn test_missing_content_type() {
        match parse_response(response(200, None, r#"{"data":[]}"#)) {
            Err(Error::Network { reason, status }) => {
                assert_eq!(reason, "OK");
                assert_eq!(status, 200);
            }
            other => panic!("Expected Error::Network, got {:?}", other),
        }
    }

    #[test]
    fn test_non_json_content_type() {
        match parse_response(response(500, Some("text/html"), "<html></html>")) {
            Err(Error::Network { reason, status }) => {
                assert_eq!(reason, "Internal Server Error");
                assert_eq!(status, 500);
            }
            other => panic!("Expected Error::Network, got {:?}", other),
        }
    }

    #[test]
    fn test_media_type_match_is_exact() {
        let result = parse_response(response(200, Some("application/json-patch"), "{}"));
        assert!(matches!(result, Err(Error::Network { status: 200, .. })));

        let result = parse_response(response(200, Some("text/json"), "{}"));
        assert!(matches!(result, Err(Error::Network { .. })));
    }
}
