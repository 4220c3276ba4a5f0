//! Conflict policy behaviour of the merge importer against a real store

mod helpers;

use chrono::{Duration, TimeZone, Utc};
use helpers::{create_test_db, set_mtime, write_file};
use lingo_import::db::translations::{count_translations, find_translation};
use lingo_import::services::MergeImporter;
use lingo_import::{FormatRegistry, ImportPolicy};
use tempfile::TempDir;

fn policy(force: bool, merge_by_recency: bool, case_insensitive: bool) -> ImportPolicy {
    ImportPolicy {
        force,
        merge_by_recency,
        case_insensitive,
    }
}

#[tokio::test]
async fn test_conflict_without_policy_is_skipped() {
    let (_db_dir, pool) = create_test_db().await;
    let formats = FormatRegistry::with_default_loaders();
    let importer = MergeImporter::new(&pool, &formats);
    let files = TempDir::new().unwrap();

    let first = write_file(files.path(), "a/messages.en.yml", "hello: Hello\n");
    let second = write_file(files.path(), "b/messages.en.yml", "hello: Hi\n");

    importer.import_file(&first, &ImportPolicy::default()).await.unwrap();
    let report = importer.import_file(&second, &ImportPolicy::default()).await.unwrap();

    assert_eq!(report.imported, 0);
    assert_eq!(report.skipped_keys, vec!["messages/en/hello"]);

    let unit = find_translation(&pool, "messages", "hello", "en").await.unwrap().unwrap();
    assert_eq!(unit.content(), "Hello");
}

#[tokio::test]
async fn test_force_overwrites() {
    let (_db_dir, pool) = create_test_db().await;
    let formats = FormatRegistry::with_default_loaders();
    let importer = MergeImporter::new(&pool, &formats);
    let files = TempDir::new().unwrap();

    let first = write_file(files.path(), "a/messages.en.yml", "hello: Hello\n");
    let second = write_file(files.path(), "b/messages.en.yml", "hello: Hi\n");

    importer.import_file(&first, &ImportPolicy::default()).await.unwrap();
    let report = importer.import_file(&second, &policy(true, false, false)).await.unwrap();

    assert_eq!(report.imported, 1);
    assert!(report.skipped_keys.is_empty());

    let unit = find_translation(&pool, "messages", "hello", "en").await.unwrap().unwrap();
    assert_eq!(unit.content(), "Hi");
    assert!(unit.is_modified());
    assert_eq!(unit.source_path(), Some(second.display().to_string().as_str()));
}

#[tokio::test]
async fn test_recency_newer_file_wins() {
    let (_db_dir, pool) = create_test_db().await;
    let formats = FormatRegistry::with_default_loaders();
    let importer = MergeImporter::new(&pool, &formats);
    let files = TempDir::new().unwrap();
    let t1 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let t2 = t1 + Duration::days(30);

    let first = write_file(files.path(), "a/messages.en.yml", "hello: Hello\n");
    set_mtime(&first, t1);
    let second = write_file(files.path(), "b/messages.en.yml", "hello: Hi\n");
    set_mtime(&second, t2);

    importer.import_file(&first, &ImportPolicy::default()).await.unwrap();
    let report = importer.import_file(&second, &policy(false, true, false)).await.unwrap();

    assert_eq!(report.imported, 1);
    let unit = find_translation(&pool, "messages", "hello", "en").await.unwrap().unwrap();
    assert_eq!(unit.content(), "Hi");
    assert_eq!(unit.updated_at(), t2);
}

#[tokio::test]
async fn test_recency_older_file_is_skipped() {
    let (_db_dir, pool) = create_test_db().await;
    let formats = FormatRegistry::with_default_loaders();
    let importer = MergeImporter::new(&pool, &formats);
    let files = TempDir::new().unwrap();
    let t1 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let t2 = t1 - Duration::days(30);

    let first = write_file(files.path(), "a/messages.en.yml", "hello: Hello\n");
    set_mtime(&first, t1);
    let second = write_file(files.path(), "b/messages.en.yml", "hello: Hi\n");
    set_mtime(&second, t2);

    importer.import_file(&first, &ImportPolicy::default()).await.unwrap();
    let report = importer.import_file(&second, &policy(false, true, false)).await.unwrap();

    assert_eq!(report.imported, 0);
    assert_eq!(report.skipped_keys, vec!["messages/en/hello"]);
    let unit = find_translation(&pool, "messages", "hello", "en").await.unwrap().unwrap();
    assert_eq!(unit.content(), "Hello");
}

#[tokio::test]
async fn test_case_insensitive_keys_collapse() {
    let (_db_dir, pool) = create_test_db().await;
    let formats = FormatRegistry::with_default_loaders();
    let importer = MergeImporter::new(&pool, &formats);
    let files = TempDir::new().unwrap();

    let path = write_file(files.path(), "Messages.EN.yml", "Hello: Hi\nhello: Hi\n");
    let report = importer.import_file(&path, &policy(false, false, true)).await.unwrap();

    assert_eq!(report.imported, 1);
    assert!(report.skipped_keys.is_empty());
    assert_eq!(count_translations(&pool, None).await.unwrap(), 1);
    assert!(find_translation(&pool, "messages", "hello", "en").await.unwrap().is_some());
}

#[tokio::test]
async fn test_case_sensitive_keys_stay_apart() {
    let (_db_dir, pool) = create_test_db().await;
    let formats = FormatRegistry::with_default_loaders();
    let importer = MergeImporter::new(&pool, &formats);
    let files = TempDir::new().unwrap();

    let path = write_file(files.path(), "messages.en.yml", "Hello: Hi\nhello: Hi\n");
    let report = importer.import_file(&path, &ImportPolicy::default()).await.unwrap();

    assert_eq!(report.imported, 2);
    assert_eq!(count_translations(&pool, Some("en")).await.unwrap(), 2);
}

#[tokio::test]
async fn test_identical_reimport_is_noop() {
    let (_db_dir, pool) = create_test_db().await;
    let formats = FormatRegistry::with_default_loaders();
    let importer = MergeImporter::new(&pool, &formats);
    let files = TempDir::new().unwrap();

    let path = write_file(files.path(), "messages.en.yml", "hello: Hello\nbye: Bye\n");
    importer.import_file(&path, &ImportPolicy::default()).await.unwrap();
    let before = find_translation(&pool, "messages", "hello", "en").await.unwrap().unwrap();

    for merge in [false, true] {
        let report = importer.import_file(&path, &policy(false, merge, false)).await.unwrap();
        assert_eq!(report.imported, 0);
        assert!(report.skipped_keys.is_empty());
    }

    let after = find_translation(&pool, "messages", "hello", "en").await.unwrap().unwrap();
    assert_eq!(before, after);
    assert_eq!(count_translations(&pool, None).await.unwrap(), 2);
}

#[tokio::test]
async fn test_skipped_keys_are_per_call() {
    let (_db_dir, pool) = create_test_db().await;
    let formats = FormatRegistry::with_default_loaders();
    let importer = MergeImporter::new(&pool, &formats);
    let files = TempDir::new().unwrap();

    let base = write_file(files.path(), "a/messages.en.yml", "one: One\ntwo: Two\n");
    let first = write_file(files.path(), "b/messages.en.yml", "one: 1\n");
    let second = write_file(files.path(), "c/messages.en.yml", "two: 2\n");

    importer.import_file(&base, &ImportPolicy::default()).await.unwrap();
    let report_a = importer.import_file(&first, &ImportPolicy::default()).await.unwrap();
    let report_b = importer.import_file(&second, &ImportPolicy::default()).await.unwrap();

    assert_eq!(report_a.skipped_keys, vec!["messages/en/one"]);
    assert_eq!(report_b.skipped_keys, vec!["messages/en/two"]);
}
