//! Translation unit persistence
//!
//! Key groups are unique per (domain, key); units are unique per
//! (key group, locale). All writes go through those natural keys.

use lingo_common::db::{KeyGroup, TranslationUnit};
use lingo_common::time::{parse_db_string, to_db_string};
use lingo_common::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

fn parse_uuid(value: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| Error::CorruptRecord(format!("Invalid stored id {:?}: {}", value, e)))
}

fn unit_from_row(row: &SqliteRow) -> Result<TranslationUnit> {
    let guid: String = row.try_get("guid")?;
    let key_group_id: String = row.try_get("trans_key_id")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(TranslationUnit::from_parts(
        parse_uuid(&guid)?,
        parse_uuid(&key_group_id)?,
        row.try_get("locale")?,
        row.try_get("content")?,
        row.try_get("source_path")?,
        parse_db_string(&created_at)?,
        parse_db_string(&updated_at)?,
        row.try_get("is_modified")?,
    ))
}

/// Load key group by natural key
pub async fn find_key_group(pool: &SqlitePool, domain: &str, key: &str) -> Result<Option<KeyGroup>> {
    let row = sqlx::query(
        r#"
        SELECT guid, domain, key_name, created_at
        FROM trans_keys
        WHERE domain = ? AND key_name = ?
        "#,
    )
    .bind(domain)
    .bind(key)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => {
            let guid: String = row.try_get("guid")?;
            let created_at: String = row.try_get("created_at")?;
            Ok(Some(KeyGroup {
                guid: parse_uuid(&guid)?,
                domain: row.try_get("domain")?,
                key: row.try_get("key_name")?,
                created_at: parse_db_string(&created_at)?,
            }))
        }
        None => Ok(None),
    }
}

/// Load key group, creating it first if absent
pub async fn find_or_create_key_group(pool: &SqlitePool, domain: &str, key: &str) -> Result<KeyGroup> {
    let candidate = KeyGroup::new(domain, key);

    sqlx::query(
        r#"
        INSERT INTO trans_keys (guid, domain, key_name, created_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(domain, key_name) DO NOTHING
        "#,
    )
    .bind(candidate.guid.to_string())
    .bind(&candidate.domain)
    .bind(&candidate.key)
    .bind(to_db_string(&candidate.created_at))
    .execute(pool)
    .await?;

    find_key_group(pool, domain, key)
        .await?
        .ok_or_else(|| Error::NotFound(format!("key group {}/{}", domain, key)))
}

/// Load the unit for (domain, key, locale)
pub async fn find_translation(
    pool: &SqlitePool,
    domain: &str,
    key: &str,
    locale: &str,
) -> Result<Option<TranslationUnit>> {
    let row = sqlx::query(
        r#"
        SELECT t.guid, t.trans_key_id, t.locale, t.content, t.source_path,
               t.is_modified, t.created_at, t.updated_at
        FROM translations t
        JOIN trans_keys k ON k.guid = t.trans_key_id
        WHERE k.domain = ? AND k.key_name = ? AND t.locale = ?
        "#,
    )
    .bind(domain)
    .bind(key)
    .bind(locale)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(unit_from_row).transpose()
}

/// Insert a new unit
pub async fn insert_translation(pool: &SqlitePool, unit: &TranslationUnit) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO translations
            (guid, trans_key_id, locale, content, source_path, is_modified, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(unit.guid().to_string())
    .bind(unit.key_group_id().to_string())
    .bind(unit.locale())
    .bind(unit.content())
    .bind(unit.source_path())
    .bind(unit.is_modified())
    .bind(to_db_string(&unit.created_at()))
    .bind(to_db_string(&unit.updated_at()))
    .execute(pool)
    .await?;

    Ok(())
}

/// Persist content, source, timestamp and modified flag of an existing unit
///
/// Returns `NotFound` if the unit was never stored.
pub async fn update_translation_content(pool: &SqlitePool, unit: &TranslationUnit) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE translations
        SET content = ?, source_path = ?, is_modified = ?, updated_at = ?
        WHERE guid = ?
        "#,
    )
    .bind(unit.content())
    .bind(unit.source_path())
    .bind(unit.is_modified())
    .bind(to_db_string(&unit.updated_at()))
    .bind(unit.guid().to_string())
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("translation {}", unit.guid())));
    }
    Ok(())
}

/// Insert or replace the unit for its (key group, locale)
///
/// An existing row keeps its guid and `created_at`.
pub async fn upsert_translation(pool: &SqlitePool, unit: &TranslationUnit) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO translations
            (guid, trans_key_id, locale, content, source_path, is_modified, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(trans_key_id, locale) DO UPDATE SET
            content = excluded.content,
            source_path = excluded.source_path,
            is_modified = excluded.is_modified,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(unit.guid().to_string())
    .bind(unit.key_group_id().to_string())
    .bind(unit.locale())
    .bind(unit.content())
    .bind(unit.source_path())
    .bind(unit.is_modified())
    .bind(to_db_string(&unit.created_at()))
    .bind(to_db_string(&unit.updated_at()))
    .execute(pool)
    .await?;

    Ok(())
}

/// Clear every `is_modified` flag; returns rows touched
pub async fn reset_modified_flags(pool: &SqlitePool) -> Result<u64> {
    let result = sqlx::query("UPDATE translations SET is_modified = 0 WHERE is_modified != 0")
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn count_modified(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM translations WHERE is_modified != 0")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Count units, optionally for one locale
pub async fn count_translations(pool: &SqlitePool, locale: Option<&str>) -> Result<i64> {
    let count: i64 = match locale {
        Some(locale) => {
            sqlx::query_scalar("SELECT COUNT(*) FROM translations WHERE locale = ?")
                .bind(locale)
                .fetch_one(pool)
                .await?
        }
        None => {
            sqlx::query_scalar("SELECT COUNT(*) FROM translations")
                .fetch_one(pool)
                .await?
        }
    };
    Ok(count)
}
