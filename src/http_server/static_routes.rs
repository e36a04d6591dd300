//! Static client assets
//!
//! Serves the browser client page and its stylesheet from a directory on
//! disk. Files are read per request so edits show up without a restart.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};

use super::errors::ApiError;
use super::routes::{not_found, Verb};

/// Location of the client assets
pub struct StaticState {
    pub client_dir: PathBuf,
}

impl StaticState {
    pub fn new(client_dir: impl Into<PathBuf>) -> Self {
        Self {
            client_dir: client_dir.into(),
        }
    }
}

/// Create static asset routes
pub fn static_routes(state: Arc<StaticState>) -> Router {
    Router::new()
        .route("/", any(client_endpoint))
        .route("/style.css", any(style_endpoint))
        .with_state(state)
}

async fn client_endpoint(State(state): State<Arc<StaticState>>, method: Method) -> Response {
    match Verb::classify(&method) {
        Verb::Get => serve_asset(&state.client_dir, "client.html", "text/html").await,
        _ => not_found(&method),
    }
}

async fn style_endpoint(State(state): State<Arc<StaticState>>, method: Method) -> Response {
    match Verb::classify(&method) {
        Verb::Get => serve_asset(&state.client_dir, "style.css", "text/css").await,
        _ => not_found(&method),
    }
}

async fn serve_asset(dir: &Path, file: &str, content_type: &'static str) -> Response {
    let path = dir.join(file);
    match tokio::fs::read(&path).await {
        Ok(bytes) => (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], bytes).into_response(),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "static asset unreadable");
            ApiError::internal(format!("Unable to load {}", file)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serve_existing_asset() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("style.css"), "body { margin: 0; }").unwrap();

        let response = serve_asset(dir.path(), "style.css", "text/css").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");
    }

    #[tokio::test]
    async fn test_missing_asset_is_internal_error() {
        let dir = tempfile::tempdir().unwrap();

        let response = serve_asset(dir.path(), "client.html", "text/html").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["id"], "internalError");
        assert_eq!(body["message"], "Unable to load client.html");
    }
}
