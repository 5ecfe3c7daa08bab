//! # Tunedrop Common Library
//!
//! Shared code for the tunedrop music-sharing service including:
//! - Database schema initialization and models
//! - Password hashing primitives
//! - Configuration loading and root folder resolution
//! - Common error types

pub mod auth;
pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
