//! HTTP handlers for tunedrop-ui

pub mod accounts;
pub mod health;
pub mod library;
pub mod notice;
pub mod playlists;
pub mod session;

pub use accounts::{login, logout, serve_index, signup};
pub use health::health_routes;
pub use library::{home, play_track, upload_music};
pub use playlists::{
    add_to_playlist, create_playlist, delete_playlist, remove_song_from_playlist, view_playlist,
};
pub use session::require_login;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

/// Handler-level error mapped onto an HTTP response
///
/// Validation and authorization outcomes are notice redirects built inline in
/// the handlers; this type covers the remaining not-found and failure paths.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Internal(String),
}

impl From<tunedrop_common::Error> for ApiError {
    fn from(e: tunedrop_common::Error) -> Self {
        // Shared-layer failures (database, IO, config) are all server faults
        ApiError::Internal(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => {
                error!("Request failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_errors_become_internal() {
        let e = tunedrop_common::Error::Config("bad root folder".to_string());
        assert!(matches!(ApiError::from(e), ApiError::Internal(_)));

        let e =
            tunedrop_common::Error::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        assert!(matches!(ApiError::from(e), ApiError::Internal(_)));
    }

    #[tokio::test]
    async fn not_found_responds_404_with_message() {
        let response = ApiError::NotFound("Playlist not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Playlist not found");
    }

    #[tokio::test]
    async fn internal_response_hides_detail() {
        let response = ApiError::Internal("sqlite file vanished".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "internal error");
    }
}
