//! Error type shared by the translation store and configuration layers

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// SQLite failure; the store cannot be trusted for further writes
    #[error("Translation store error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file missing, unreadable or inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// Record expected to exist was not stored
    #[error("Not found: {0}")]
    NotFound(String),

    /// Record value rejected by a model invariant
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Stored column could not be decoded (bad uuid, bad timestamp)
    #[error("Corrupt stored record: {0}")]
    CorruptRecord(String),
}

impl Error {
    /// Whether the error comes from the persisted store itself
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Error::Database(_) | Error::CorruptRecord(_))
    }
}
