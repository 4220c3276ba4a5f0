//! Database models

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Key-grouping record: one translation key within one domain
///
/// Owns one [`TranslationUnit`] per locale. Not a filesystem file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyGroup {
    pub guid: Uuid,
    pub domain: String,
    pub key: String,
    pub created_at: DateTime<Utc>,
}

impl KeyGroup {
    pub fn new(domain: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            guid: Uuid::new_v4(),
            domain: domain.into(),
            key: key.into(),
            created_at: Utc::now(),
        }
    }
}

/// Validation groups for [`TranslationUnit::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationGroup {
    /// Locale must be non-empty; content may be blank
    Default,
    /// Additionally requires non-blank content
    ContentNotBlank,
}

/// One (locale, content) pairing owned by a [`KeyGroup`]
///
/// Locale and content travel together: changing the locale discards the
/// content so it can never sit under the wrong locale tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationUnit {
    guid: Uuid,
    key_group_id: Uuid,
    locale: String,
    content: String,
    source_path: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    is_modified: bool,
}

impl TranslationUnit {
    /// Create a new, empty unit for `locale` owned by `key_group_id`
    pub fn new(key_group_id: Uuid, locale: impl Into<String>) -> Result<Self> {
        let now = Utc::now();
        let mut unit = Self {
            guid: Uuid::new_v4(),
            key_group_id,
            locale: String::new(),
            content: String::new(),
            source_path: None,
            created_at: now,
            updated_at: now,
            is_modified: false,
        };
        unit.set_locale(locale)?;
        Ok(unit)
    }

    /// Rebuild a unit from persisted columns
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        guid: Uuid,
        key_group_id: Uuid,
        locale: String,
        content: String,
        source_path: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        is_modified: bool,
    ) -> Self {
        Self {
            guid,
            key_group_id,
            locale,
            content,
            source_path,
            created_at,
            updated_at,
            is_modified,
        }
    }

    pub fn guid(&self) -> Uuid {
        self.guid
    }

    pub fn key_group_id(&self) -> Uuid {
        self.key_group_id
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Set locale; resets content to empty
    pub fn set_locale(&mut self, locale: impl Into<String>) -> Result<()> {
        let locale = locale.into();
        if locale.trim().is_empty() {
            return Err(Error::Validation("Translation locale must not be empty".to_string()));
        }
        self.locale = locale;
        self.content = String::new();
        Ok(())
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace content; `updated_at` moves to `at` whenever the content changes
    pub fn set_content(&mut self, content: impl Into<String>, at: DateTime<Utc>) {
        let content = content.into();
        if content != self.content {
            self.content = content;
            self.updated_at = at;
        }
    }

    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    pub fn set_source_path(&mut self, path: impl Into<String>) {
        self.source_path = Some(path.into());
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Stamp the unit with the time its incoming content was authored
    pub fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }

    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    pub fn set_is_modified(&mut self, is_modified: bool) {
        self.is_modified = is_modified;
    }

    /// Check constraints for the given validation group
    pub fn validate(&self, group: ValidationGroup) -> Result<()> {
        if self.locale.trim().is_empty() {
            return Err(Error::Validation("Translation locale must not be empty".to_string()));
        }
        if group == ValidationGroup::ContentNotBlank && self.content.trim().is_empty() {
            return Err(Error::Validation(format!(
                "Translation content for locale \"{}\" must not be blank",
                self.locale
            )));
        }
        Ok(())
    }
}
