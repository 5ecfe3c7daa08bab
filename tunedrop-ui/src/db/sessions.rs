//! Session persistence
//!
//! The browser holds an opaque UUID token in an HttpOnly cookie; the
//! `sessions` table maps tokens to user ids with a Unix-timestamp expiry
//! compared numerically. Expired or unknown tokens count as logged out.

use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use tunedrop_common::Result;
use uuid::Uuid;

/// Create a session for a user and return the new token
pub async fn create_session(pool: &SqlitePool, user_id: i64, timeout_secs: i64) -> Result<String> {
    let token = Uuid::new_v4().to_string();
    let expires_at = (Utc::now() + Duration::seconds(timeout_secs)).timestamp();

    sqlx::query("INSERT INTO sessions (token, user_id, expires_at) VALUES (?, ?, ?)")
        .bind(&token)
        .bind(user_id)
        .bind(expires_at)
        .execute(pool)
        .await?;

    Ok(token)
}

/// Resolve a session token to its user, ignoring expired sessions
pub async fn lookup_user(pool: &SqlitePool, token: &str) -> Result<Option<(i64, String)>> {
    let now = Utc::now().timestamp();

    let row: Option<(i64, String)> = sqlx::query_as(
        r#"
        SELECT users.id, users.username
        FROM sessions
        JOIN users ON users.id = sessions.user_id
        WHERE sessions.token = ? AND sessions.expires_at > ?
        "#,
    )
    .bind(token)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Delete a session by token (no-op if absent)
pub async fn delete_session(pool: &SqlitePool, token: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(())
}

/// Remove all expired sessions, returning the number deleted
pub async fn purge_expired(pool: &SqlitePool) -> Result<u64> {
    let now = Utc::now().timestamp();

    let done = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
        .bind(now)
        .execute(pool)
        .await?;

    Ok(done.rows_affected())
}
