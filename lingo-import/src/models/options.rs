//! Run options and merge policy

use crate::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Conflict policy applied to every entry of every imported file
///
/// Passed explicitly to each import call; the importer holds no run state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportPolicy {
    /// Overwrite existing content unconditionally
    pub force: bool,
    /// Resolve conflicts by timestamp, newest wins
    pub merge_by_recency: bool,
    /// Lower-case locale, domain and key before lookup/insert
    pub case_insensitive: bool,
}

/// Options of one import run, as given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOptions {
    /// Import only this module's translations
    pub bundle: Option<String>,
    /// Use the global (application override) variant of module directories
    pub globals: bool,
    pub force: bool,
    /// Merge by recency; application files are imported last
    pub merge: bool,
    pub case_insensitive: bool,
    /// Import from this path only
    pub import_path: Option<PathBuf>,
    /// Skip the application-level directory
    pub only_vendors: bool,
    /// Remove compiled catalogue caches for the imported locales afterwards
    pub cache_clear: bool,
    /// Explicit locale filter; empty means the managed locales
    pub locales: Vec<String>,
    /// Explicit domain filter; empty means every domain
    pub domains: Vec<String>,
}

impl ImportOptions {
    /// Reject incompatible flag combinations
    ///
    /// Pure check over the flags; performs no I/O.
    pub fn validate(&self) -> ImportResult<()> {
        if self.only_vendors && self.globals {
            return Err(ImportError::Configuration(
                "You cannot use \"globals\" and \"only-vendors\" at the same time.".to_string(),
            ));
        }

        if self.import_path.is_some() && (self.globals || self.merge || self.only_vendors) {
            return Err(ImportError::Configuration(
                "You cannot use \"globals\", \"merge\" or \"only-vendors\" and \"import-path\" at the same time."
                    .to_string(),
            ));
        }

        Ok(())
    }

    pub fn policy(&self) -> ImportPolicy {
        ImportPolicy {
            force: self.force,
            merge_by_recency: self.merge,
            case_insensitive: self.case_insensitive,
        }
    }

    /// Explicit locales, or `managed` when none were given
    pub fn effective_locales(&self, managed: &[String]) -> ImportResult<Vec<String>> {
        let locales: Vec<String> = if self.locales.is_empty() {
            managed.to_vec()
        } else {
            self.locales.clone()
        };

        if locales.is_empty() {
            return Err(ImportError::Configuration(
                "No locales given and no managed locales configured.".to_string(),
            ));
        }

        Ok(locales)
    }
}

/// Split a comma-separated `--domains` value, dropping blanks
pub fn parse_domains(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect()
}
