//! Database access layer for tunedrop-ui
//!
//! Thin query functions over the shared pool; one module per table group.

pub mod playlists;
pub mod sessions;
pub mod tracks;
pub mod users;
