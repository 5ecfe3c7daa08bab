//! Track catalog queries

use sqlx::SqlitePool;
use tunedrop_common::db::models::Track;
use tunedrop_common::Result;

/// Insert a track row for an uploaded file, returning its id
pub async fn insert_track(
    pool: &SqlitePool,
    title: &str,
    artist: &str,
    genre: &str,
    file_path: &str,
) -> Result<i64> {
    let done = sqlx::query(
        "INSERT INTO music (title, artist, genre, file_path) VALUES (?, ?, ?, ?)",
    )
    .bind(title)
    .bind(artist)
    .bind(genre)
    .bind(file_path)
    .execute(pool)
    .await?;

    Ok(done.last_insert_rowid())
}

/// List the whole catalog in storage order
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Track>> {
    let tracks = sqlx::query_as::<_, Track>(
        "SELECT id, title, artist, genre, file_path FROM music ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(tracks)
}

/// Resolve a track id to its stored file path
pub async fn file_path(pool: &SqlitePool, track_id: i64) -> Result<Option<String>> {
    let path: Option<String> = sqlx::query_scalar("SELECT file_path FROM music WHERE id = ?")
        .bind(track_id)
        .fetch_optional(pool)
        .await?;

    Ok(path)
}
