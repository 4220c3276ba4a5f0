//! Compiled catalogue cache removal
//!
//! The host application compiles catalogues to `catalogue.<locale>.*` files
//! in its translation cache directory; stale ones must go after an import.

use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct CacheCleaner {
    cache_dir: PathBuf,
}

impl CacheCleaner {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Remove cached catalogues for `locales`; returns the number of files removed
    ///
    /// A missing cache directory removes nothing.
    pub fn clear(&self, locales: &[String]) -> io::Result<usize> {
        if !self.cache_dir.is_dir() {
            debug!(dir = %self.cache_dir.display(), "No translation cache directory");
            return Ok(0);
        }

        let prefixes: Vec<String> = locales.iter().map(|l| format!("catalogue.{}.", l)).collect();

        let mut removed = 0;
        for entry in std::fs::read_dir(&self.cache_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if prefixes.iter().any(|p| name.starts_with(p.as_str())) {
                std::fs::remove_file(entry.path())?;
                debug!(file = %name, "Removed cached catalogue");
                removed += 1;
            }
        }

        info!("Removed {} cached catalogue file(s) for {}", removed, locales.join(", "));
        Ok(removed)
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }
}
