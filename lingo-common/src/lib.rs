//! # Lingo Common Library
//!
//! Shared code for the lingo translation tools including:
//! - Error type shared by the store and configuration layers
//! - Configuration loading (TOML) and config file resolution
//! - Persisted translation store schema and data model
//! - Timestamp helpers

pub mod config;
pub mod db;
pub mod error;
pub mod time;

pub use config::LingoConfig;
pub use error::{Error, Result};
