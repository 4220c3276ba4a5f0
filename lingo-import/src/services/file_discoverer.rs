//! Translation resource file discovery
//!
//! Finds `domain.locale.format` files below one root directory. A missing
//! directory or an empty result is reported as [`Discovery::NoFiles`], never
//! as an error; only malformed filter input fails.

use regex::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Suffix appended to module roots when autocompleting
pub const TRANSLATIONS_SUBDIR: &str = "Resources/translations";

/// Discovery input errors
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("At least one locale is required")]
    NoLocales,

    #[error("At least one file format is required")]
    NoFormats,

    /// Blank token, path separator, or a dot in a locale or format
    #[error("Invalid {kind} {token:?}")]
    InvalidToken { kind: &'static str, token: String },

    #[error("Invalid file name pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Discovery result for one root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovery {
    /// Directory missing or nothing matched
    NoFiles { directory: PathBuf },
    /// Matching files, sorted by path
    Files { directory: PathBuf, files: Vec<PathBuf> },
}

impl Discovery {
    /// Directory that was (or would have been) scanned
    pub fn directory(&self) -> &Path {
        match self {
            Discovery::NoFiles { directory } | Discovery::Files { directory, .. } => directory,
        }
    }

    pub fn files(&self) -> &[PathBuf] {
        match self {
            Discovery::NoFiles { .. } => &[],
            Discovery::Files { files, .. } => files,
        }
    }
}

/// Translation file finder
pub struct FileDiscoverer {
    resources_dir: PathBuf,
    ignore_patterns: Vec<String>,
}

impl FileDiscoverer {
    /// Create a discoverer anchored at the application's canonical resources dir
    ///
    /// Version-control directories are never descended into.
    pub fn new(resources_dir: impl Into<PathBuf>) -> Self {
        Self {
            resources_dir: resources_dir.into(),
            ignore_patterns: vec![".git".to_string(), ".svn".to_string(), ".hg".to_string()],
        }
    }

    /// Find the resource files below `root` matching the filters
    pub fn discover(
        &self,
        root: &Path,
        locales: &[String],
        domains: &[String],
        formats: &[String],
        autocomplete_path: bool,
    ) -> Result<Discovery, DiscoveryError> {
        let pattern = file_name_pattern(locales, domains, formats)?;
        let directory = self.resolve_directory(root, autocomplete_path);

        tracing::info!("*** Using dir {} to lookup translation files. ***", directory.display());

        if !directory.is_dir() {
            return Ok(Discovery::NoFiles { directory });
        }

        let walker = WalkDir::new(&directory)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| self.should_process_entry(e));

        let mut files = Vec::new();
        for entry in walker {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file()
                        && pattern.is_match(&entry.file_name().to_string_lossy())
                    {
                        files.push(entry.into_path());
                    }
                }
                Err(e) => {
                    tracing::warn!("Error accessing entry: {}", e);
                    // Continue scanning, don't abort
                }
            }
        }

        tracing::debug!(
            directory = %directory.display(),
            files = files.len(),
            "Discovery complete"
        );

        if files.is_empty() {
            Ok(Discovery::NoFiles { directory })
        } else {
            Ok(Discovery::Files { directory, files })
        }
    }

    /// Directory actually scanned for `root`
    ///
    /// With `autocomplete_path`, roots outside the canonical resources dir get
    /// `Resources/translations` appended.
    pub fn resolve_directory(&self, root: &Path, autocomplete_path: bool) -> PathBuf {
        let backslash = std::path::MAIN_SEPARATOR == '\\';
        let root = PathBuf::from(normalize_separators(&root.to_string_lossy(), backslash));

        if !autocomplete_path {
            return root;
        }

        let resources = PathBuf::from(normalize_separators(
            &self.resources_dir.to_string_lossy(),
            backslash,
        ));
        if root.starts_with(&resources) {
            root
        } else {
            root.join(TRANSLATIONS_SUBDIR)
        }
    }

    fn should_process_entry(&self, entry: &DirEntry) -> bool {
        // The walk root itself is always processed
        if entry.depth() == 0 {
            return true;
        }
        let file_name = entry.file_name().to_string_lossy();
        !(entry.file_type().is_dir() && self.ignore_patterns.iter().any(|p| file_name == p.as_str()))
    }
}

/// Replace backslash separators with forward slashes when the platform uses them
pub fn normalize_separators(path: &str, backslash_separator: bool) -> String {
    if backslash_separator {
        path.replace('\\', "/")
    } else {
        path.to_string()
    }
}

/// Anchored base-name pattern `domain.locale.format`
///
/// Every token is escaped; an empty domain set leaves the first segment free.
/// Blank tokens, path separators, and dots in locales or formats are rejected
/// so that every matched name splits back into the requested tokens.
pub fn file_name_pattern(
    locales: &[String],
    domains: &[String],
    formats: &[String],
) -> Result<Regex, DiscoveryError> {
    if locales.is_empty() {
        return Err(DiscoveryError::NoLocales);
    }
    if formats.is_empty() {
        return Err(DiscoveryError::NoFormats);
    }

    let locale_alt = alternation("locale", locales, false)?;
    let format_alt = alternation("format", formats, false)?;

    let pattern = if domains.is_empty() {
        format!(r"^.*\.({})\.({})$", locale_alt, format_alt)
    } else {
        let domain_alt = alternation("domain", domains, true)?;
        format!(r"^({})\.({})\.({})$", domain_alt, locale_alt, format_alt)
    };

    Ok(Regex::new(&pattern)?)
}

fn alternation(kind: &'static str, tokens: &[String], allow_dots: bool) -> Result<String, DiscoveryError> {
    let mut escaped = Vec::with_capacity(tokens.len());
    for token in tokens {
        // Locale and format are the last two dot-separated name segments
        let bad_dot = !allow_dots && token.contains('.');
        if token.trim().is_empty() || token.contains('/') || token.contains('\\') || bad_dot {
            return Err(DiscoveryError::InvalidToken {
                kind,
                token: token.clone(),
            });
        }
        escaped.push(regex::escape(token));
    }
    Ok(escaped.join("|"))
}
