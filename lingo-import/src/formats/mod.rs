//! Translation resource format loaders
//!
//! Resource files follow the `domain.locale.format` naming convention. The
//! registry picks a loader by the `format` segment and turns the file into a
//! flat list of entries; domain and locale come from the file name.

pub mod json;
pub mod xliff;
pub mod yaml;

use chrono::{DateTime, Utc};
use std::path::Path;
use thiserror::Error;

/// Format loader errors
#[derive(Debug, Error)]
pub enum ParseError {
    /// Content is not valid for the format
    #[error("Syntax error: {0}")]
    Syntax(String),

    /// Valid syntax, but not a translation catalogue shape
    #[error("Unexpected structure: {0}")]
    Structure(String),

    /// No loader registered for the extension
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// File name is not `domain.locale.format`
    #[error("File name {0:?} does not follow the domain.locale.format convention")]
    FileName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One message decoded by a loader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedMessage {
    pub key: String,
    pub value: String,
    /// Timestamp carried by the format itself, if any
    pub updated_at: Option<DateTime<Utc>>,
}

impl LoadedMessage {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            updated_at: None,
        }
    }
}

/// A decoded (domain, locale, key, value) entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    pub domain: String,
    pub locale: String,
    pub key: String,
    pub value: String,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Decodes one format into messages, in document order
pub trait TranslationLoader: Send + Sync {
    /// Extension tokens handled by this loader
    fn extensions(&self) -> &'static [&'static str];

    fn load(&self, content: &str) -> Result<Vec<LoadedMessage>, ParseError>;
}

/// Ordered set of supported formats and their loaders
pub struct FormatRegistry {
    loaders: Vec<(String, Box<dyn TranslationLoader>)>,
}

impl FormatRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self { loaders: Vec::new() }
    }

    /// Registry with the built-in XLIFF, YAML and JSON loaders
    pub fn with_default_loaders() -> Self {
        let mut registry = Self::new();
        registry.register(xliff::XliffLoader);
        registry.register(yaml::YamlLoader);
        registry.register(json::JsonLoader);
        registry
    }

    /// Register a loader for each of its extensions
    pub fn register<L>(&mut self, loader: L)
    where
        L: TranslationLoader + Clone + 'static,
    {
        for ext in loader.extensions() {
            self.loaders.retain(|(existing, _)| existing.as_str() != *ext);
            self.loaders.push((ext.to_string(), Box::new(loader.clone())));
        }
    }

    /// Keep only the formats named in `allowed`
    pub fn restrict_to(&mut self, allowed: &[String]) -> Result<(), ParseError> {
        if let Some(unknown) = allowed.iter().find(|a| self.loader_for(a).is_none()) {
            return Err(ParseError::UnsupportedFormat(unknown.clone()));
        }
        self.loaders.retain(|(ext, _)| allowed.iter().any(|a| a == ext));
        Ok(())
    }

    /// Supported format tokens, in registration order
    pub fn supported_formats(&self) -> Vec<String> {
        self.loaders.iter().map(|(ext, _)| ext.clone()).collect()
    }

    pub fn loader_for(&self, format: &str) -> Option<&dyn TranslationLoader> {
        self.loaders
            .iter()
            .find(|(ext, _)| ext == format)
            .map(|(_, loader)| loader.as_ref())
    }

    /// Read and decode a resource file
    pub fn parse(&self, path: &Path) -> Result<Vec<ParsedEntry>, ParseError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let (domain, locale, format) =
            split_resource_name(&file_name).ok_or_else(|| ParseError::FileName(file_name.clone()))?;

        let loader = self
            .loader_for(format)
            .ok_or_else(|| ParseError::UnsupportedFormat(format.to_string()))?;

        let content = std::fs::read_to_string(path)?;
        let messages = loader.load(&content)?;

        Ok(messages
            .into_iter()
            .map(|m| ParsedEntry {
                domain: domain.to_string(),
                locale: locale.to_string(),
                key: m.key,
                value: m.value,
                timestamp: m.updated_at,
            })
            .collect())
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_default_loaders()
    }
}

/// Split `domain.locale.format`; the domain may itself contain dots
pub fn split_resource_name(file_name: &str) -> Option<(&str, &str, &str)> {
    let mut parts = file_name.rsplitn(3, '.');
    let format = parts.next()?;
    let locale = parts.next()?;
    let domain = parts.next()?;

    if domain.is_empty() || locale.is_empty() || format.is_empty() {
        return None;
    }
    Some((domain, locale, format))
}
