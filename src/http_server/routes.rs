//! # Router
//!
//! Paths are matched exactly by the route table. Methods are compared
//! case-insensitively inside each endpoint, so an unsupported method on a
//! known path lands on the same not-found answer as an unknown path.

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};

use super::errors::ApiError;
use super::response::write_head_only;

pub const NOT_FOUND_MESSAGE: &str = "The page you are looking for was not found.";

/// Request method as seen by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Head,
    Post,
    Other,
}

impl Verb {
    /// Classify a method, ignoring case
    pub fn classify(method: &Method) -> Self {
        match method.as_str().to_ascii_uppercase().as_str() {
            "GET" => Verb::Get,
            "HEAD" => Verb::Head,
            "POST" => Verb::Post,
            _ => Verb::Other,
        }
    }
}

/// Answer for unmatched (path, method) pairs: header-only for HEAD, JSON otherwise
pub fn not_found(method: &Method) -> Response {
    match Verb::classify(method) {
        Verb::Head => write_head_only(StatusCode::NOT_FOUND),
        _ => ApiError::not_found(NOT_FOUND_MESSAGE).into_response(),
    }
}

/// Router fallback
pub async fn fallback(method: Method) -> Response {
    tracing::debug!(%method, "no route matched");
    not_found(&method)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_ignores_case() {
        assert_eq!(Verb::classify(&Method::GET), Verb::Get);
        assert_eq!(Verb::classify(&Method::from_bytes(b"get").unwrap()), Verb::Get);
        assert_eq!(Verb::classify(&Method::from_bytes(b"Head").unwrap()), Verb::Head);
        assert_eq!(Verb::classify(&Method::from_bytes(b"post").unwrap()), Verb::Post);
        assert_eq!(Verb::classify(&Method::DELETE), Verb::Other);
    }

    #[tokio::test]
    async fn test_not_found_head_has_no_body() {
        let response = not_found(&Method::HEAD);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_not_found_get_has_json_body() {
        let response = not_found(&Method::GET);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["id"], "notFound");
        assert_eq!(body["message"], NOT_FOUND_MESSAGE);
    }
}
