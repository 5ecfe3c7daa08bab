//! Playlist and playlist-link queries

use serde::Serialize;
use sqlx::SqlitePool;
use tunedrop_common::db::models::Playlist;
use tunedrop_common::Result;

/// Outcome of linking a track into a playlist
#[derive(Debug, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// The (playlist, track) pair already exists; the unique constraint
    /// rejected the insert and no row was written.
    Duplicate,
}

/// Track columns shown in a playlist view (no file path)
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PlaylistTrack {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub genre: String,
}

/// Insert a playlist owned by a user, returning its id
pub async fn insert_playlist(
    pool: &SqlitePool,
    user_id: i64,
    name: &str,
    description: Option<&str>,
) -> Result<i64> {
    let done = sqlx::query("INSERT INTO playlists (user_id, name, description) VALUES (?, ?, ?)")
        .bind(user_id)
        .bind(name)
        .bind(description)
        .execute(pool)
        .await?;

    Ok(done.last_insert_rowid())
}

/// Look up the owner of a playlist
pub async fn owner(pool: &SqlitePool, playlist_id: i64) -> Result<Option<i64>> {
    let user_id: Option<i64> = sqlx::query_scalar("SELECT user_id FROM playlists WHERE id = ?")
        .bind(playlist_id)
        .fetch_optional(pool)
        .await?;

    Ok(user_id)
}

/// List a user's playlists in creation order
pub async fn list_for_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<Playlist>> {
    let playlists = sqlx::query_as::<_, Playlist>(
        "SELECT id, user_id, name, description FROM playlists WHERE user_id = ? ORDER BY id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(playlists)
}

/// Fetch playlist metadata by id
pub async fn find_playlist(pool: &SqlitePool, playlist_id: i64) -> Result<Option<Playlist>> {
    let playlist = sqlx::query_as::<_, Playlist>(
        "SELECT id, user_id, name, description FROM playlists WHERE id = ?",
    )
    .bind(playlist_id)
    .fetch_optional(pool)
    .await?;

    Ok(playlist)
}

/// Link a track into a playlist
///
/// A duplicate pair is reported, not fatal: the unique constraint is the
/// only guard needed, including against concurrent inserts.
pub async fn add_track(
    pool: &SqlitePool,
    playlist_id: i64,
    music_id: i64,
) -> Result<AddOutcome> {
    let result = sqlx::query("INSERT INTO playlist_songs (playlist_id, music_id) VALUES (?, ?)")
        .bind(playlist_id)
        .bind(music_id)
        .execute(pool)
        .await;

    match result {
        Ok(_) => Ok(AddOutcome::Added),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(AddOutcome::Duplicate),
        Err(e) => Err(e.into()),
    }
}

/// Unlink a track from a playlist; idempotent (absent link is a no-op)
pub async fn remove_track(pool: &SqlitePool, playlist_id: i64, music_id: i64) -> Result<u64> {
    let done = sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = ? AND music_id = ?")
        .bind(playlist_id)
        .bind(music_id)
        .execute(pool)
        .await?;

    Ok(done.rows_affected())
}

/// Delete a playlist and all of its link rows in one transaction
pub async fn delete_playlist(pool: &SqlitePool, playlist_id: i64) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = ?")
        .bind(playlist_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(playlist_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(())
}

/// Tracks linked into a playlist, in storage order
pub async fn tracks_in_playlist(
    pool: &SqlitePool,
    playlist_id: i64,
) -> Result<Vec<PlaylistTrack>> {
    let tracks = sqlx::query_as::<_, PlaylistTrack>(
        r#"
        SELECT music.id, music.title, music.artist, music.genre
        FROM music
        JOIN playlist_songs ON music.id = playlist_songs.music_id
        WHERE playlist_songs.playlist_id = ?
        ORDER BY playlist_songs.id
        "#,
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    Ok(tracks)
}
