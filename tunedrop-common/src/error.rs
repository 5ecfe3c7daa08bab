//! Common error types for tunedrop

use thiserror::Error;

/// Common result type for tunedrop operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the tunedrop service
///
/// The web crate maps validation and not-found outcomes onto responses
/// directly; this enum only carries the failures shared code can hit.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
