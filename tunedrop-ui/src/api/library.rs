//! Track catalog: home listing, upload, and playback streaming

use axum::extract::{Multipart, Path, Request, State};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::Serialize;
use tower::util::ServiceExt;
use tower_http::services::ServeFile;
use tracing::info;
use uuid::Uuid;

use crate::api::notice::notice_redirect;
use crate::api::session::CurrentUser;
use crate::api::ApiError;
use crate::db::{playlists, tracks};
use crate::AppState;
use tunedrop_common::db::models::{Playlist, Track};

/// Home page data: the whole catalog plus the session user's playlists
#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub username: String,
    pub songs: Vec<Track>,
    pub playlists: Vec<Playlist>,
}

/// GET /home
pub async fn home(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<HomeResponse>, ApiError> {
    let songs = tracks::list_all(&state.db).await?;
    let playlists = playlists::list_for_user(&state.db, user.id).await?;

    Ok(Json(HomeResponse {
        username: user.username,
        songs,
        playlists,
    }))
}

/// POST /upload_music
///
/// Multipart form with `title`, `artist`, `genre` fields and a `music_file`
/// part. The file is stored under a UUID-based name that keeps the original
/// extension, so concurrent uploads of identically named files cannot
/// overwrite each other.
pub async fn upload_music(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut title: Option<String> = None;
    let mut artist: Option<String> = None;
    let mut genre: Option<String> = None;
    let mut file: Option<(String, axum::body::Bytes)> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(_) => return Ok(notice_redirect("/home", "Invalid upload")),
        };

        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("title") => title = field.text().await.ok(),
            Some("artist") => artist = field.text().await.ok(),
            Some("genre") => genre = field.text().await.ok(),
            Some("music_file") => {
                let original_name = field.file_name().unwrap_or_default().to_owned();
                let bytes = match field.bytes().await {
                    Ok(bytes) => bytes,
                    Err(_) => return Ok(notice_redirect("/home", "Invalid upload")),
                };
                file = Some((original_name, bytes));
            }
            _ => {}
        }
    }

    let Some((original_name, bytes)) = file else {
        return Ok(notice_redirect("/home", "No file uploaded"));
    };
    if original_name.is_empty() {
        return Ok(notice_redirect("/home", "No file selected"));
    }

    let (title, artist, genre) = match (trimmed(title), trimmed(artist), trimmed(genre)) {
        (Some(t), Some(a), Some(g)) => (t, a, g),
        _ => return Ok(notice_redirect("/home", "Please fill in all fields")),
    };

    // UUID storage key, original extension preserved
    let stored_name = match std::path::Path::new(&original_name)
        .extension()
        .and_then(|e| e.to_str())
    {
        Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
        None => Uuid::new_v4().to_string(),
    };
    let dest = state.upload_dir.join(&stored_name);

    tokio::fs::write(&dest, &bytes)
        .await
        .map_err(tunedrop_common::Error::Io)?;

    let file_path = dest.to_string_lossy().into_owned();
    let id = tracks::insert_track(&state.db, &title, &artist, &genre, &file_path).await?;
    info!(
        "User '{}' uploaded '{}' as track {} ({} bytes)",
        user.username,
        original_name,
        id,
        bytes.len()
    );

    Ok(notice_redirect("/home", "Music uploaded successfully!"))
}

fn trimmed(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// GET /play/:id
///
/// Streams the stored file for a track. The incoming request is handed to
/// ServeFile as-is so Range and conditional headers keep working; that is
/// what lets players seek.
pub async fn play_track(
    State(state): State<AppState>,
    Path(track_id): Path<i64>,
    request: Request,
) -> Result<Response, ApiError> {
    let Some(path) = tracks::file_path(&state.db, track_id).await? else {
        return Ok(notice_redirect("/home", "Music not found"));
    };

    match ServeFile::new(&path).oneshot(request).await {
        Ok(response) => Ok(response.into_response()),
        Err(e) => Err(ApiError::Internal(format!(
            "Failed to stream {}: {}",
            path, e
        ))),
    }
}
