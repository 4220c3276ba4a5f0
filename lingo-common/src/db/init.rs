//! Database initialization
//!
//! Opens (creating if needed) the SQLite translation store and makes sure
//! the schema exists. Safe to call on every run.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Import is strictly sequential, a small pool is plenty
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(4)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    init_schema(&pool).await?;

    Ok(pool)
}

/// Create all store tables (idempotent)
///
/// Also used directly by tests running against `sqlite::memory:`.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    // Foreign keys are per-connection in SQLite
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(pool)
        .await?;

    create_trans_keys_table(pool).await?;
    create_translations_table(pool).await?;

    Ok(())
}

/// Key-grouping records: one row per (domain, key)
pub async fn create_trans_keys_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS trans_keys (
            guid TEXT PRIMARY KEY,
            domain TEXT NOT NULL,
            key_name TEXT NOT NULL,
            created_at TEXT NOT NULL,
            UNIQUE(domain, key_name)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Translation units: one row per (key group, locale)
pub async fn create_translations_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS translations (
            guid TEXT PRIMARY KEY,
            trans_key_id TEXT NOT NULL REFERENCES trans_keys(guid) ON DELETE CASCADE,
            locale TEXT NOT NULL CHECK (length(locale) > 0),
            content TEXT NOT NULL DEFAULT '',
            source_path TEXT,
            is_modified INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            UNIQUE(trans_key_id, locale)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_translations_locale ON translations(locale)")
        .execute(pool)
        .await?;

    Ok(())
}
