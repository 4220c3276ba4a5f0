//! Data models for lingo-import

pub mod import_result;
pub mod import_task;
pub mod options;

pub use import_result::{FileImportReport, FileOutcome, RunSummary, TaskOutcome};
pub use import_task::{ImportTask, TaskKind};
pub use options::{parse_domains, ImportOptions, ImportPolicy};
