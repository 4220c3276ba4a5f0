//! Planned import locations

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where a task's root directory came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Application-level translation directory
    Application,
    /// Module root; translations live under `Resources/translations`
    Module,
    /// Application override directory for one module
    GlobalModule,
    /// Third-party component translation directory
    Component,
    /// User-supplied `--import-path`
    Path,
}

/// One root location to scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportTask {
    pub root: PathBuf,
    /// Human-readable label for progress output
    pub label: String,
    pub is_global: bool,
    pub kind: TaskKind,
}

impl ImportTask {
    pub fn new(root: PathBuf, label: impl Into<String>, kind: TaskKind) -> Self {
        Self {
            root,
            label: label.into(),
            is_global: kind == TaskKind::GlobalModule,
            kind,
        }
    }

    /// Whether discovery should append `Resources/translations` to the root
    pub fn autocomplete_path(&self) -> bool {
        matches!(self.kind, TaskKind::Module | TaskKind::GlobalModule)
    }
}
