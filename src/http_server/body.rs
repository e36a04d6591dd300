//! # Body Reader
//!
//! Collects a request payload and decodes it into a field map according to
//! the declared content type. The content type is sniffed with a substring
//! check, so parameters and unusual casing are tolerated.

use axum::body::Body;
use axum::http::{header, HeaderMap};
use serde_json::{Map, Value};
use thiserror::Error;

/// Decoded request fields
pub type Fields = Map<String, Value>;

/// Body encodings accepted by the mutation endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    Json,
    Form,
}

impl BodyEncoding {
    /// Detect the encoding from the `Content-Type` header
    pub fn sniff(headers: &HeaderMap) -> Option<Self> {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_lowercase();

        if content_type.contains("application/json") {
            Some(BodyEncoding::Json)
        } else if content_type.contains("application/x-www-form-urlencoded") {
            Some(BodyEncoding::Form)
        } else {
            None
        }
    }
}

/// Body reading failures
#[derive(Debug, Error)]
pub enum BodyError {
    /// Transport failure or payload above the size limit
    #[error("failed to read request body: {0}")]
    Read(String),

    /// Payload does not parse under the declared encoding
    #[error("failed to decode request body: {0}")]
    Decode(String),
}

/// Await the full payload, then decode it
pub async fn read_fields(
    encoding: BodyEncoding,
    body: Body,
    limit: usize,
) -> Result<Fields, BodyError> {
    let bytes = axum::body::to_bytes(body, limit)
        .await
        .map_err(|e| BodyError::Read(e.to_string()))?;
    decode(encoding, &bytes)
}

/// Decode a complete payload. An empty payload is an empty map.
pub fn decode(encoding: BodyEncoding, bytes: &[u8]) -> Result<Fields, BodyError> {
    if bytes.is_empty() {
        return Ok(Fields::new());
    }

    match encoding {
        BodyEncoding::Json => {
            let value: Value =
                serde_json::from_slice(bytes).map_err(|e| BodyError::Decode(e.to_string()))?;
            // Non-object payloads carry no usable fields
            match value {
                Value::Object(fields) => Ok(fields),
                _ => Ok(Fields::new()),
            }
        }
        BodyEncoding::Form => {
            let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(bytes)
                .map_err(|e| BodyError::Decode(e.to_string()))?;
            Ok(collect_pairs(pairs))
        }
    }
}

/// Fold form pairs into fields; a repeated key becomes a list
fn collect_pairs(pairs: Vec<(String, String)>) -> Fields {
    let mut fields = Fields::new();
    for (key, value) in pairs {
        match fields.get_mut(&key) {
            Some(Value::Array(items)) => items.push(Value::String(value)),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, Value::String(value)]);
            }
            None => {
                fields.insert(key, Value::String(value));
            }
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde_json::json;

    fn headers(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        headers
    }

    #[test]
    fn test_sniff() {
        assert_eq!(
            BodyEncoding::sniff(&headers("Application/JSON; charset=utf-8")),
            Some(BodyEncoding::Json)
        );
        assert_eq!(
            BodyEncoding::sniff(&headers("application/x-www-form-urlencoded")),
            Some(BodyEncoding::Form)
        );
        assert_eq!(BodyEncoding::sniff(&headers("text/plain")), None);
        assert_eq!(BodyEncoding::sniff(&HeaderMap::new()), None);
    }

    #[test]
    fn test_decode_json() {
        let fields = decode(BodyEncoding::Json, br#"{"id": 1, "name": "A"}"#).unwrap();
        assert_eq!(fields.get("id"), Some(&json!(1)));

        assert!(decode(BodyEncoding::Json, b"").unwrap().is_empty());
        assert!(decode(BodyEncoding::Json, b"[1, 2]").unwrap().is_empty());
        assert!(matches!(
            decode(BodyEncoding::Json, b"{not json"),
            Err(BodyError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_form() {
        let fields =
            decode(BodyEncoding::Form, b"id=12&name=Mr.+Mime&type=Psychic&type=Fairy").unwrap();
        assert_eq!(fields.get("id"), Some(&json!("12")));
        assert_eq!(fields.get("name"), Some(&json!("Mr. Mime")));
        assert_eq!(fields.get("type"), Some(&json!(["Psychic", "Fairy"])));
    }

    #[tokio::test]
    async fn test_read_fields_respects_limit() {
        let body = Body::from(vec![b'a'; 64]);
        let result = read_fields(BodyEncoding::Form, body, 16).await;
        assert!(matches!(result, Err(BodyError::Read(_))));
    }
}
