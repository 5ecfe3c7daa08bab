//! tunedrop-ui library - music sharing web service
//!
//! Users register, log in, upload audio files, organize them into playlists,
//! and stream them back. Handlers are a thin layer over SQLite.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use sqlx::SqlitePool;
use std::path::PathBuf;
use tower_http::cors::CorsLayer;

pub mod api;
pub mod db;

/// Application state shared across HTTP handlers
///
/// One connection pool for the whole process; each handler gets a
/// request-scoped handle from it instead of opening its own connection.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Directory uploaded audio files are stored in
    pub upload_dir: PathBuf,
    /// Session lifetime in seconds (from the settings table)
    pub session_timeout_secs: i64,
    /// Maximum accepted upload body size in bytes
    pub upload_max_bytes: usize,
}

impl AppState {
    /// Create new application state
    pub fn new(
        db: SqlitePool,
        upload_dir: PathBuf,
        session_timeout_secs: i64,
        upload_max_bytes: usize,
    ) -> Self {
        Self {
            db,
            upload_dir,
            session_timeout_secs,
            upload_max_bytes,
        }
    }
}

/// Build application router
///
/// Protected routes require a valid session cookie and redirect to /login
/// otherwise. Playlist detail, remove-song, and delete-playlist stay public
/// (see DESIGN.md on the ownership gap).
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;

    let protected = Router::new()
        .route("/home", get(api::home))
        .route("/create_playlist", post(api::create_playlist))
        .route("/upload_music", post(api::upload_music))
        .route("/add_to_playlist", post(api::add_to_playlist))
        .route("/play/:id", get(api::play_track))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::require_login,
        ));

    let public = Router::new()
        .route("/", get(api::serve_index))
        .route("/login", get(api::serve_index).post(api::login))
        .route("/signup", get(api::serve_index).post(api::signup))
        .route("/logout", get(api::logout))
        .route("/playlist/:id", get(api::view_playlist))
        .route(
            "/remove_song_from_playlist",
            post(api::remove_song_from_playlist),
        )
        .route("/delete_playlist/:id", post(api::delete_playlist))
        .merge(api::health_routes());

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(DefaultBodyLimit::max(state.upload_max_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
