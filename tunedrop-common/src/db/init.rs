//! Database initialization
//!
//! Creates the database file and schema on first run; opening an existing
//! database re-applies the idempotent `CREATE TABLE IF NOT EXISTS` statements
//! and fills in any missing default settings.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::{info, warn};

/// Initialize database connection pool and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL mode allows concurrent readers with one writer
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    // Schema creation (idempotent - safe to call multiple times)
    create_users_table(&pool).await?;
    create_music_table(&pool).await?;
    create_playlists_table(&pool).await?;
    create_playlist_songs_table(&pool).await?;
    create_sessions_table(&pool).await?;
    create_settings_table(&pool).await?;

    init_default_settings(&pool).await?;

    Ok(pool)
}

async fn create_users_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            password_salt TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_music_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS music (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            artist TEXT NOT NULL,
            genre TEXT NOT NULL,
            file_path TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_playlists_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS playlists (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id),
            name TEXT NOT NULL,
            description TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_playlists_user ON playlists(user_id)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_playlist_songs_table(pool: &SqlitePool) -> Result<()> {
    // UNIQUE(playlist_id, music_id) is the duplicate-insert guard
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS playlist_songs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            playlist_id INTEGER NOT NULL REFERENCES playlists(id),
            music_id INTEGER NOT NULL REFERENCES music(id),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            UNIQUE(playlist_id, music_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_playlist_songs_playlist ON playlist_songs(playlist_id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_sessions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            token TEXT PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES users(id),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            expires_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sessions_expires ON sessions(expires_at)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the settings table
///
/// Stores application configuration key-value pairs.
pub async fn create_settings_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Initialize or update default settings
///
/// Ensures all required settings exist with default values and resets
/// NULL values back to defaults.
async fn init_default_settings(pool: &SqlitePool) -> Result<()> {
    // HTTP server settings
    ensure_setting(pool, "http_port", "5730").await?;

    // Session and authentication settings
    ensure_setting(pool, "session_timeout_seconds", "604800").await?; // 7 days

    // Upload settings
    ensure_setting(pool, "upload_max_bytes", "52428800").await?; // 50 MB

    info!("Default settings initialized");
    Ok(())
}

/// Ensure a setting exists with the specified default value
///
/// If the setting doesn't exist, it will be created with the default.
/// If the setting exists but has a NULL value, it will be reset to the default.
async fn ensure_setting(pool: &SqlitePool, key: &str, default_value: &str) -> Result<()> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM settings WHERE key = ?)")
        .bind(key)
        .fetch_one(pool)
        .await?;

    if !exists {
        // INSERT OR IGNORE handles concurrent initialization races
        sqlx::query("INSERT OR IGNORE INTO settings (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(default_value)
            .execute(pool)
            .await?;

        info!(
            "Initialized setting '{}' with default value: {}",
            key, default_value
        );
        return Ok(());
    }

    let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_one(pool)
        .await?;

    if value.is_none() {
        sqlx::query("UPDATE settings SET value = ? WHERE key = ?")
            .bind(default_value)
            .bind(key)
            .execute(pool)
            .await?;

        warn!(
            "Setting '{}' was NULL, reset to default: {}",
            key, default_value
        );
    }

    Ok(())
}

/// Read an integer setting, falling back to a default when absent or malformed
pub async fn setting_i64(pool: &SqlitePool, key: &str, default: i64) -> Result<i64> {
    let row: Option<Option<String>> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;

    Ok(row
        .flatten()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default))
}

/// Read a port-sized setting, warning and falling back when the stored value
/// does not fit a u16
pub async fn setting_u16(pool: &SqlitePool, key: &str, default: u16) -> Result<u16> {
    let raw = setting_i64(pool, key, i64::from(default)).await?;

    match u16::try_from(raw) {
        Ok(value) => Ok(value),
        Err(_) => {
            warn!(
                "Setting '{}' value {} does not fit a u16, using default {}",
                key, raw, default
            );
            Ok(default)
        }
    }
}

/// Read a byte-count setting, warning and falling back when the stored value
/// is negative
pub async fn setting_usize(pool: &SqlitePool, key: &str, default: usize) -> Result<usize> {
    let raw = setting_i64(pool, key, i64::try_from(default).unwrap_or(i64::MAX)).await?;

    match usize::try_from(raw) {
        Ok(value) => Ok(value),
        Err(_) => {
            warn!(
                "Setting '{}' value {} is not a valid byte count, using default {}",
                key, raw, default
            );
            Ok(default)
        }
    }
}
