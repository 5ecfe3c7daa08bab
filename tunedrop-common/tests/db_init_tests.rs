//! Integration tests for database initialization
//!
//! Covers schema creation, idempotent re-initialization, unique constraint
//! enforcement, and default settings.

use tunedrop_common::db::{init_database, setting_i64, setting_u16, setting_usize};

async fn setup() -> (sqlx::SqlitePool, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("Should create temp dir");
    let pool = init_database(&tmp.path().join("tunedrop.db"))
        .await
        .expect("Should initialize database");
    (pool, tmp)
}

#[tokio::test]
async fn test_init_creates_all_tables() {
    let (pool, _tmp) = setup().await;

    let tables: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for expected in ["users", "music", "playlists", "playlist_songs", "sessions", "settings"] {
        assert!(
            tables.iter().any(|t| t == expected),
            "missing table {expected}, got {tables:?}"
        );
    }
}

#[tokio::test]
async fn test_init_is_idempotent() {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("tunedrop.db");

    let pool = init_database(&db_path).await.unwrap();
    sqlx::query("INSERT INTO users (username, email, password_hash, password_salt) VALUES ('alice', 'a@x.com', 'h', 's')")
        .execute(&pool)
        .await
        .unwrap();
    pool.close().await;

    // Re-opening must not lose data
    let pool = init_database(&db_path).await.unwrap();
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_username_and_email_are_unique() {
    let (pool, _tmp) = setup().await;

    sqlx::query("INSERT INTO users (username, email, password_hash, password_salt) VALUES ('alice', 'a@x.com', 'h', 's')")
        .execute(&pool)
        .await
        .unwrap();

    // Same username, different email
    let dup_username = sqlx::query("INSERT INTO users (username, email, password_hash, password_salt) VALUES ('alice', 'b@y.com', 'h', 's')")
        .execute(&pool)
        .await;
    assert!(matches!(
        dup_username,
        Err(sqlx::Error::Database(ref e)) if e.is_unique_violation()
    ));

    // Same email, different username
    let dup_email = sqlx::query("INSERT INTO users (username, email, password_hash, password_salt) VALUES ('bob', 'a@x.com', 'h', 's')")
        .execute(&pool)
        .await;
    assert!(matches!(
        dup_email,
        Err(sqlx::Error::Database(ref e)) if e.is_unique_violation()
    ));
}

#[tokio::test]
async fn test_playlist_song_pair_is_unique() {
    let (pool, _tmp) = setup().await;

    sqlx::query("INSERT INTO users (username, email, password_hash, password_salt) VALUES ('alice', 'a@x.com', 'h', 's')")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO playlists (user_id, name) VALUES (1, 'Favorites')")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO music (title, artist, genre, file_path) VALUES ('t', 'a', 'g', '/tmp/x.mp3')")
        .execute(&pool)
        .await
        .unwrap();

    sqlx::query("INSERT INTO playlist_songs (playlist_id, music_id) VALUES (1, 1)")
        .execute(&pool)
        .await
        .unwrap();

    let dup = sqlx::query("INSERT INTO playlist_songs (playlist_id, music_id) VALUES (1, 1)")
        .execute(&pool)
        .await;
    assert!(matches!(
        dup,
        Err(sqlx::Error::Database(ref e)) if e.is_unique_violation()
    ));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM playlist_songs")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1, "duplicate insert must not add a second link row");
}

#[tokio::test]
async fn test_default_settings_seeded() {
    let (pool, _tmp) = setup().await;

    assert_eq!(setting_i64(&pool, "http_port", 0).await.unwrap(), 5730);
    assert_eq!(
        setting_i64(&pool, "session_timeout_seconds", 0).await.unwrap(),
        604800
    );
    assert_eq!(
        setting_i64(&pool, "upload_max_bytes", 0).await.unwrap(),
        52428800
    );

    // Missing key falls back to the caller's default
    assert_eq!(setting_i64(&pool, "no_such_key", 42).await.unwrap(), 42);
}

#[tokio::test]
async fn test_out_of_range_settings_fall_back_to_defaults() {
    let (pool, _tmp) = setup().await;

    // 70000 does not fit a port number
    sqlx::query("UPDATE settings SET value = '70000' WHERE key = 'http_port'")
        .execute(&pool)
        .await
        .unwrap();
    assert_eq!(setting_u16(&pool, "http_port", 5730).await.unwrap(), 5730);

    // A negative byte count must not wrap around to a huge limit
    sqlx::query("UPDATE settings SET value = '-1' WHERE key = 'upload_max_bytes'")
        .execute(&pool)
        .await
        .unwrap();
    assert_eq!(
        setting_usize(&pool, "upload_max_bytes", 52428800)
            .await
            .unwrap(),
        52428800
    );

    // In-range values still pass through unchanged
    sqlx::query("UPDATE settings SET value = '8080' WHERE key = 'http_port'")
        .execute(&pool)
        .await
        .unwrap();
    assert_eq!(setting_u16(&pool, "http_port", 5730).await.unwrap(), 8080);
}
