//! Database schema, initialization, and shared models

pub mod init;
pub mod models;

pub use init::{init_database, setting_i64, setting_u16, setting_usize};
