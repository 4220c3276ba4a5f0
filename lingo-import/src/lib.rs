//! lingo-import library interface
//!
//! Imports translation resource files from an application, its modules and
//! third-party components into the persisted translation store.

pub mod db;
pub mod error;
pub mod formats;
pub mod models;
pub mod registry;
pub mod services;

pub use crate::error::{ImportError, ImportResult};
pub use crate::formats::FormatRegistry;
pub use crate::models::{ImportOptions, ImportPolicy, RunSummary};
pub use crate::services::ImportRunner;
