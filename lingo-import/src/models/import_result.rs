//! Import outcomes, per file, per task and per run

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Result of importing one resource file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileImportReport {
    /// Entries inserted or overwritten
    pub imported: usize,
    /// `domain/locale/key` of entries left untouched by the conflict policy
    pub skipped_keys: Vec<String>,
}

/// Outcome of one discovered file within a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub imported: usize,
    pub skipped_keys: Vec<String>,
    /// Per-file failure (parse or read error); the run continued
    pub error: Option<String>,
}

impl FileOutcome {
    pub fn imported(path: PathBuf, report: FileImportReport) -> Self {
        Self {
            path,
            imported: report.imported,
            skipped_keys: report.skipped_keys,
            error: None,
        }
    }

    pub fn failed(path: PathBuf, error: String) -> Self {
        Self {
            path,
            imported: 0,
            skipped_keys: Vec::new(),
            error: Some(error),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Outcome of one planned task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOutcome {
    pub label: String,
    /// Directory actually scanned
    pub directory: PathBuf,
    /// Empty when discovery found no matching file
    pub files: Vec<FileOutcome>,
}

impl TaskOutcome {
    pub fn no_files(&self) -> bool {
        self.files.is_empty()
    }

    pub fn imported(&self) -> usize {
        self.files.iter().map(|f| f.imported).sum()
    }
}

/// Aggregate outcome of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub locales: Vec<String>,
    pub tasks: Vec<TaskOutcome>,
    /// Units whose content changed during this run
    pub modified_units: i64,
    /// Cache files removed by `--cache-clear`
    pub cache_files_removed: usize,
    /// Cache removal failure; the imported translations are kept
    pub cache_clear_error: Option<String>,
}

impl RunSummary {
    pub fn total_files(&self) -> usize {
        self.tasks.iter().map(|t| t.files.len()).sum()
    }

    pub fn total_imported(&self) -> usize {
        self.tasks.iter().map(TaskOutcome::imported).sum()
    }

    pub fn total_skipped(&self) -> usize {
        self.files().map(|f| f.skipped_keys.len()).sum()
    }

    pub fn failed_files(&self) -> Vec<&FileOutcome> {
        self.files().filter(|f| f.is_failed()).collect()
    }

    /// Every file outcome, in processing order
    pub fn files(&self) -> impl Iterator<Item = &FileOutcome> {
        self.tasks.iter().flat_map(|t| t.files.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(imported: usize, skipped: usize) -> FileOutcome {
        FileOutcome::imported(
            PathBuf::from("messages.en.yml"),
            FileImportReport {
                imported,
                skipped_keys: (0..skipped).map(|i| format!("messages/en/k{}", i)).collect(),
            },
        )
    }

    #[test]
    fn test_summary_totals() {
        let summary = RunSummary {
            tasks: vec![
                TaskOutcome {
                    label: "Blog".to_string(),
                    directory: PathBuf::from("a"),
                    files: vec![outcome(3, 0), outcome(1, 2)],
                },
                TaskOutcome {
                    label: "application".to_string(),
                    directory: PathBuf::from("b"),
                    files: vec![FileOutcome::failed(PathBuf::from("bad.en.yml"), "oops".to_string())],
                },
            ],
            ..Default::default()
        };

        assert_eq!(summary.total_files(), 3);
        assert_eq!(summary.total_imported(), 4);
        assert_eq!(summary.total_skipped(), 2);
        assert_eq!(summary.failed_files().len(), 1);
    }

    #[test]
    fn test_task_without_files_reports_no_files() {
        let task = TaskOutcome {
            label: "empty".to_string(),
            directory: PathBuf::from("x"),
            files: Vec::new(),
        };
        assert!(task.no_files());
        assert_eq!(task.imported(), 0);
    }
}
