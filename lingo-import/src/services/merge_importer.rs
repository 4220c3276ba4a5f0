//! Merge of decoded resource entries into the translation store
//!
//! Every entry is matched against the persisted unit for its
//! (domain, key, locale) and resolved by the [`ImportPolicy`] of the call.

use crate::db::translations;
use crate::error::{ImportError, ImportResult};
use crate::formats::{FormatRegistry, ParseError, ParsedEntry};
use crate::models::{FileImportReport, ImportPolicy};
use chrono::{DateTime, Utc};
use lingo_common::db::{TranslationUnit, ValidationGroup};
use lingo_common::time::from_system_time;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::debug;

/// What to do with one incoming entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeDecision {
    /// No unit yet for this locale
    Insert,
    /// Replace the stored content; `changed` is false when it already matches
    Overwrite { changed: bool },
    /// Same content already stored
    Unchanged,
    /// Conflict left unresolved by the policy
    Skip,
}

/// Resolve one entry against the stored `(content, updated_at)` of its unit
pub fn decide(
    existing: Option<(&str, DateTime<Utc>)>,
    incoming_value: &str,
    incoming_at: DateTime<Utc>,
    policy: &ImportPolicy,
) -> MergeDecision {
    let Some((content, updated_at)) = existing else {
        return MergeDecision::Insert;
    };

    if policy.force {
        return MergeDecision::Overwrite {
            changed: content != incoming_value,
        };
    }

    if content == incoming_value {
        return MergeDecision::Unchanged;
    }

    if policy.merge_by_recency && incoming_at > updated_at {
        return MergeDecision::Overwrite { changed: true };
    }

    MergeDecision::Skip
}

/// Entry identity after case folding
struct EntryKey {
    domain: String,
    locale: String,
    key: String,
}

impl EntryKey {
    fn from_entry(entry: &ParsedEntry, case_insensitive: bool) -> Self {
        if case_insensitive {
            Self {
                domain: entry.domain.to_lowercase(),
                locale: entry.locale.to_lowercase(),
                key: entry.key.to_lowercase(),
            }
        } else {
            Self {
                domain: entry.domain.clone(),
                locale: entry.locale.clone(),
                key: entry.key.clone(),
            }
        }
    }

    fn skipped_label(&self) -> String {
        format!("{}/{}/{}", self.domain, self.locale, self.key)
    }
}

/// Per-file importer
pub struct MergeImporter<'a> {
    db: &'a SqlitePool,
    formats: &'a FormatRegistry,
}

impl<'a> MergeImporter<'a> {
    pub fn new(db: &'a SqlitePool, formats: &'a FormatRegistry) -> Self {
        Self { db, formats }
    }

    /// Import every entry of `path` under `policy`
    ///
    /// Decode and read failures are reported as [`ImportError::Parse`] and
    /// [`ImportError::Io`] before any entry is written. An entry rejected by a
    /// unit invariant stops the file with [`ImportError::Record`]; store
    /// failures stop it with [`ImportError::Store`].
    pub async fn import_file(&self, path: &Path, policy: &ImportPolicy) -> ImportResult<FileImportReport> {
        let entries = self.formats.parse(path).map_err(|e| match e {
            ParseError::Io(source) => ImportError::Io {
                path: path.to_path_buf(),
                source,
            },
            source => ImportError::Parse {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let file_time = std::fs::metadata(path)
            .and_then(|m| m.modified())
            .map(from_system_time)
            .map_err(|source| ImportError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let source_path = path.display().to_string();
        let mut report = FileImportReport::default();

        for entry in &entries {
            let id = EntryKey::from_entry(entry, policy.case_insensitive);
            let incoming_at = entry.timestamp.unwrap_or(file_time);

            let existing = translations::find_translation(self.db, &id.domain, &id.key, &id.locale).await?;
            let decision = decide(
                existing.as_ref().map(|u| (u.content(), u.updated_at())),
                &entry.value,
                incoming_at,
                policy,
            );

            match (decision, existing) {
                (MergeDecision::Insert, _) => {
                    let group = translations::find_or_create_key_group(self.db, &id.domain, &id.key).await?;
                    let mut unit = TranslationUnit::new(group.guid, id.locale.as_str())?;
                    unit.set_content(entry.value.as_str(), incoming_at);
                    unit.set_updated_at(incoming_at);
                    unit.set_source_path(source_path.as_str());
                    unit.set_is_modified(true);
                    unit.validate(ValidationGroup::Default)?;
                    translations::upsert_translation(self.db, &unit).await?;
                    report.imported += 1;
                }
                (MergeDecision::Overwrite { changed: true }, Some(mut unit)) => {
                    unit.set_content(entry.value.as_str(), incoming_at);
                    unit.set_updated_at(incoming_at);
                    unit.set_source_path(source_path.as_str());
                    unit.set_is_modified(true);
                    translations::update_translation_content(self.db, &unit).await?;
                    report.imported += 1;
                }
                (MergeDecision::Overwrite { .. }, _) => {
                    report.imported += 1;
                }
                (MergeDecision::Unchanged, _) => {}
                (MergeDecision::Skip, _) => {
                    report.skipped_keys.push(id.skipped_label());
                }
            }
        }

        debug!(
            path = %path.display(),
            entries = entries.len(),
            imported = report.imported,
            skipped = report.skipped_keys.len(),
            "File merged"
        );

        Ok(report)
    }
}
