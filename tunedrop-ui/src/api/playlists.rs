//! Playlist create/view/modify/delete handlers

use axum::extract::{Path, State};
use axum::response::Response;
use axum::{Extension, Form, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::notice::notice_redirect;
use crate::api::session::CurrentUser;
use crate::api::ApiError;
use crate::db::playlists::{self, AddOutcome, PlaylistTrack};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistForm {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
}

/// POST /create_playlist
pub async fn create_playlist(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Form(form): Form<CreatePlaylistForm>,
) -> Result<Response, ApiError> {
    let name = form.name.trim();

    if name.is_empty() {
        return Ok(notice_redirect("/home", "Please provide a playlist name"));
    }

    let id =
        playlists::insert_playlist(&state.db, user.id, name, form.description.as_deref()).await?;
    info!("User '{}' created playlist '{}' (id {})", user.username, name, id);

    Ok(notice_redirect("/home", "Playlist created successfully!"))
}

#[derive(Debug, Deserialize)]
pub struct AddToPlaylistForm {
    pub playlist_id: Option<i64>,
    pub music_id: Option<i64>,
}

/// POST /add_to_playlist
///
/// Only the playlist owner may add tracks; a duplicate pair is reported
/// as a notice, not an error.
pub async fn add_to_playlist(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Form(form): Form<AddToPlaylistForm>,
) -> Result<Response, ApiError> {
    let (Some(playlist_id), Some(music_id)) = (form.playlist_id, form.music_id) else {
        return Ok(notice_redirect("/home", "Invalid request"));
    };

    // Ownership check before the mutation
    match playlists::owner(&state.db, playlist_id).await? {
        Some(owner_id) if owner_id == user.id => {}
        _ => return Ok(notice_redirect("/home", "Invalid playlist")),
    }

    match playlists::add_track(&state.db, playlist_id, music_id).await? {
        AddOutcome::Added => Ok(notice_redirect("/home", "Song added to playlist!")),
        AddOutcome::Duplicate => Ok(notice_redirect("/home", "Song already in playlist")),
    }
}

/// Playlist detail response
#[derive(Debug, Serialize)]
pub struct PlaylistDetailResponse {
    pub playlist_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub songs: Vec<PlaylistTrack>,
}

/// GET /playlist/:id
///
/// Public: viewing a playlist does not require a session. Tracks come back
/// in storage order.
pub async fn view_playlist(
    State(state): State<AppState>,
    Path(playlist_id): Path<i64>,
) -> Result<Json<PlaylistDetailResponse>, ApiError> {
    let Some(playlist) = playlists::find_playlist(&state.db, playlist_id).await? else {
        return Err(ApiError::NotFound("Playlist not found".to_string()));
    };

    let songs = playlists::tracks_in_playlist(&state.db, playlist_id).await?;

    Ok(Json(PlaylistDetailResponse {
        playlist_id: playlist.id,
        name: playlist.name,
        description: playlist.description,
        songs,
    }))
}

#[derive(Debug, Deserialize)]
pub struct RemoveSongForm {
    pub song_id: Option<i64>,
    pub playlist_id: Option<i64>,
}

/// POST /remove_song_from_playlist
///
/// Idempotent: removing an absent link is a no-op. This route is not behind
/// the login gate and performs no ownership check (see DESIGN.md).
pub async fn remove_song_from_playlist(
    State(state): State<AppState>,
    Form(form): Form<RemoveSongForm>,
) -> Result<Response, ApiError> {
    let (Some(song_id), Some(playlist_id)) = (form.song_id, form.playlist_id) else {
        return Ok(notice_redirect("/home", "Missing song or playlist ID"));
    };

    playlists::remove_track(&state.db, playlist_id, song_id).await?;

    let target = format!("/playlist/{}", playlist_id);
    Ok(notice_redirect(&target, "Song removed from the playlist"))
}

/// POST /delete_playlist/:id
///
/// Removes all link rows and the playlist itself in one transaction. Not
/// behind the login gate and no ownership check (see DESIGN.md).
pub async fn delete_playlist(
    State(state): State<AppState>,
    Path(playlist_id): Path<i64>,
) -> Result<Response, ApiError> {
    playlists::delete_playlist(&state.db, playlist_id).await?;
    info!("Deleted playlist {}", playlist_id);

    Ok(notice_redirect("/home", "Playlist deleted successfully"))
}
