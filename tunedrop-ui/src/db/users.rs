//! User account queries

use sqlx::SqlitePool;
use tunedrop_common::Result;

/// Credential columns needed to verify a login attempt
#[derive(Debug, sqlx::FromRow)]
pub struct UserCredentials {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub password_salt: String,
}

/// Look up a user's stored credentials by username
pub async fn find_credentials(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<UserCredentials>> {
    let row = sqlx::query_as::<_, UserCredentials>(
        "SELECT id, username, password_hash, password_salt FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn username_exists(pool: &SqlitePool, username: &str) -> Result<bool> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = ?)")
        .bind(username)
        .fetch_one(pool)
        .await?;

    Ok(exists)
}

pub async fn email_exists(pool: &SqlitePool, email: &str) -> Result<bool> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)")
        .bind(email)
        .fetch_one(pool)
        .await?;

    Ok(exists)
}

/// Insert a new user row
///
/// Returns `None` when the unique constraint on username or email fires,
/// which can happen when two signups race past the existence checks.
pub async fn insert_user(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    password_hash: &str,
    password_salt: &str,
) -> Result<Option<i64>> {
    let result = sqlx::query(
        "INSERT INTO users (username, email, password_hash, password_salt) VALUES (?, ?, ?, ?)",
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(password_salt)
    .execute(pool)
    .await;

    match result {
        Ok(done) => Ok(Some(done.last_insert_rowid())),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(None),
        Err(e) => Err(e.into()),
    }
}
