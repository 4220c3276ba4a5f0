//! Error types for lingo-import
//!
//! Only configuration and store failures abort a run. Everything else is
//! reported against the file or task it happened in and the run carries on.

use crate::formats::ParseError;
use crate::services::file_discoverer::DiscoveryError;
use std::path::PathBuf;
use thiserror::Error;

/// Import error type
#[derive(Debug, Error)]
pub enum ImportError {
    /// Invalid or incompatible option combination, detected before any I/O
    #[error("Invalid options: {0}")]
    Configuration(String),

    /// Positional module argument names nothing in the registry
    #[error("Module \"{0}\" is not registered")]
    UnknownModule(String),

    /// Malformed discovery input (empty locale set, unsafe token, ...)
    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    /// One resource file failed to decode
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// One resource file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Incoming entry rejected by a record invariant
    #[error("Invalid translation record: {0}")]
    Record(#[source] lingo_common::Error),

    /// Persisted store failure; no further writes can succeed
    #[error("Translation store error: {0}")]
    Store(#[source] lingo_common::Error),
}

impl From<lingo_common::Error> for ImportError {
    fn from(err: lingo_common::Error) -> Self {
        if err.is_store_failure() {
            ImportError::Store(err)
        } else {
            ImportError::Record(err)
        }
    }
}

impl ImportError {
    /// Whether this error must abort the whole run
    ///
    /// Parse, read and record failures only affect the current file.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ImportError::Parse { .. } | ImportError::Io { .. } | ImportError::Record(_)
        )
    }
}

/// Result type for import operations
pub type ImportResult<T> = Result<T, ImportError>;
