//! Test Helper Utilities
//!
//! Shared project-tree and database fixtures for lingo-import tests

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use lingo_common::config::ModuleEntry;
use lingo_common::db::init_database;
use lingo_common::LingoConfig;
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::TempDir;

/// Create temporary test database with the schema applied
///
/// Returns (TempDir, SqlitePool) - TempDir must be kept alive for duration of test
pub async fn create_test_db() -> (TempDir, SqlitePool) {
    let temp_dir = TempDir::new().unwrap();
    let pool = init_database(&temp_dir.path().join("test_lingo.db")).await.unwrap();
    (temp_dir, pool)
}

/// Write `content` to `root/relative`, creating parent directories
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, content).unwrap();
    path
}

/// Set a file's modification time
pub fn set_mtime(path: &Path, time: DateTime<Utc>) {
    let file = std::fs::File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::from(time)).unwrap();
}

/// Configuration for a project rooted at `root` with one `Blog` module
/// and one `validator` component
pub fn project_config(root: &Path) -> LingoConfig {
    LingoConfig {
        project_dir: root.to_path_buf(),
        managed_locales: vec!["en".to_string()],
        modules: vec![ModuleEntry {
            name: "Blog".to_string(),
            path: PathBuf::from("src/Blog"),
            parent: None,
        }],
        components: [("validator".to_string(), PathBuf::from("vendor/validator/translations"))]
            .into_iter()
            .collect(),
        ..Default::default()
    }
}
