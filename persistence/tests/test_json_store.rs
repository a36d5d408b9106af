//! FILENAME: tests/test_json_store.rs
//! Integration tests for the JSON file data source.

mod common;

use std::fs;

use common::SalesFixture;
use persistence::{DataSource, JsonFileStore, PersistenceError};
use records::SalesRecord;
use tempfile::tempdir;

#[test]
fn test_missing_file_is_empty_set() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("dashboard.json"));
    assert!(store.fetch_all().unwrap().is_empty());
}

#[test]
fn test_replace_then_fetch_preserves_records() {
    let dir = tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path().join("data").join("dashboard.json"));

    store.replace_all(SalesFixture::records()).unwrap();
    let loaded = store.fetch_all().unwrap();

    assert_eq!(loaded, SalesFixture::records());
    assert_eq!(loaded[2].value(), 1400.0);
}

#[test]
fn test_file_is_pretty_printed_array() {
    let dir = tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path().join("dashboard.json"));
    store.replace_all(SalesFixture::records()).unwrap();

    let contents = fs::read_to_string(store.path()).unwrap();
    assert!(contents.starts_with('['));
    assert!(contents.contains("\n  {"));
}

#[test]
fn test_insert_appends_and_delete_clears() {
    let dir = tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path().join("dashboard.json"));

    store.insert(SalesFixture::records()).unwrap();
    let imported = SalesFixture::batch()
        .into_records(SalesFixture::rows())
        .unwrap();
    store.insert(imported).unwrap();
    assert_eq!(store.fetch_all().unwrap().len(), 5);

    store.delete_all().unwrap();
    assert!(store.fetch_all().unwrap().is_empty());
}

#[test]
fn test_reads_minimal_legacy_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dashboard.json");
    fs::write(
        &path,
        r#"[{"id":"x","month":"Janeiro","session":"Moda","group":"Premium","subgroup":"A","total":812,"date":"2024-01-15T10:00:00Z"}]"#,
    )
    .unwrap();

    let loaded = JsonFileStore::new(&path).fetch_all().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].value(), 812.0);
    assert!(loaded[0].product_code.is_none());
    assert!(loaded[0].date.is_some());
}

#[test]
fn test_corrupt_file_is_json_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dashboard.json");
    fs::write(&path, "{ not json").unwrap();

    let err = JsonFileStore::new(&path).fetch_all().unwrap_err();
    assert!(matches!(err, PersistenceError::Json(_)));
}

#[test]
fn test_record_without_id_is_invalid_format() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dashboard.json");
    fs::write(&path, r#"[{"id":"","month":"Janeiro"}]"#).unwrap();

    let err = JsonFileStore::new(&path).fetch_all().unwrap_err();
    assert!(matches!(err, PersistenceError::InvalidFormat(_)));
}

#[test]
fn test_blank_id_is_never_written() {
    let dir = tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path().join("dashboard.json"));
    store.replace_all(SalesFixture::records()).unwrap();

    let err = store
        .replace_all(vec![SalesRecord::new("")])
        .unwrap_err();
    assert!(matches!(err, PersistenceError::InvalidFormat(_)));

    let err = store.insert(vec![SalesRecord::new(" ")]).unwrap_err();
    assert!(matches!(err, PersistenceError::InvalidFormat(_)));

    // The file stays readable and writable.
    assert_eq!(store.fetch_all().unwrap().len(), 3);
    store.insert(vec![SalesRecord::new("ok")]).unwrap();
    assert_eq!(store.fetch_all().unwrap().len(), 4);
}
