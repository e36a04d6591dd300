//! # Response Writer
//!
//! Serialises a result and status into a JSON response, or emits headers
//! only. Both forms always carry `Content-Type: application/json`.

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

const JSON_CONTENT_TYPE: &str = "application/json";

/// JSON body with an explicit status
pub fn write_json<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => json_response(status, Body::from(bytes)),
        Err(err) => {
            tracing::error!(error = %err, "failed to serialise response body");
            let fallback = r#"{"message":"Unable to serialise response","id":"internalError"}"#;
            json_response(StatusCode::INTERNAL_SERVER_ERROR, Body::from(fallback))
        }
    }
}

/// Status and headers only, no body
pub fn write_head_only(status: StatusCode) -> Response {
    json_response(status, Body::empty())
}

fn json_response(status: StatusCode, body: Body) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
        body,
    )
        .into_response()
}
