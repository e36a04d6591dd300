//! # HTTP API Errors
//!
//! Every failure is answered with `{message, id}` where `id` is a
//! machine-readable tag.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

use super::response::write_json;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Malformed content type, unparsable body, missing or invalid field
    #[error("{0}")]
    BadRequest(String),

    /// No record or route matches
    #[error("{0}")]
    NotFound(String),

    /// Server-side failure
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error tag
    pub fn error_id(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "badRequest",
            ApiError::NotFound(_) => "notFound",
            ApiError::Internal(_) => "internalError",
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateId(_) => ApiError::BadRequest(err.to_string()),
            StoreError::NotFound(_) => ApiError::NotFound(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub id: &'static str,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            message: err.to_string(),
            id: err.error_id(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        write_json(self.status_code(), &ErrorResponse::from(&self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::bad_request("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::internal("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_body_shape() {
        let body = serde_json::to_value(ErrorResponse::from(&ApiError::not_found("Not found")))
            .unwrap();
        assert_eq!(body, serde_json::json!({"message": "Not found", "id": "notFound"}));
    }

    #[test]
    fn test_store_error_mapping() {
        let err = ApiError::from(StoreError::DuplicateId("1".to_string()));
        assert_eq!(err.error_id(), "badRequest");
        let err = ApiError::from(StoreError::LockPoisoned);
        assert_eq!(err.error_id(), "internalError");
    }
}
