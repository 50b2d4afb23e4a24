//! Loader Integration Tests
//!
//! File lookup across `$TOP/db`, configured directories and the current
//! directory, and loading fixture files end to end.

use std::fs;
use std::path::PathBuf;

use crate::db_pipeline::{fixture_path, load_fixture};

use epics_db_rs::core::loader::{DatabaseLoader, LoadError, LoaderConfig};

fn fixture_dir() -> PathBuf {
    PathBuf::from(fixture_path(""))
}

#[test]
fn load_fixture_from_search_path() {
    let loader = DatabaseLoader::new(
        LoaderConfig::default()
            .with_top_env(false)
            .with_cwd(false)
            .with_search_path(fixture_dir()),
    );
    let loaded = loader.load("scope.db").expect("fixture loads");
    assert_eq!(loaded.path, fixture_dir().join("scope.db"));
    assert_eq!(loaded.database.len(), 11);
    assert_eq!(loaded.parameters.len(), 9);
}

#[test]
fn top_db_shadows_search_paths() {
    let top = tempfile::tempdir().expect("tempdir");
    fs::create_dir(top.path().join("db")).expect("mkdir");
    fs::write(
        top.path().join("db").join("scope.db"),
        r#"record(ai, Only) { field(DTYP, "asynInt32") field(INP, "@asyn(P,0,1)ONLY") }"#,
    )
    .expect("write");

    let loader = DatabaseLoader::new(
        LoaderConfig::default()
            .with_cwd(false)
            .with_search_path(fixture_dir()),
    )
    .with_top_dir(Some(top.path().to_path_buf()));
    let loaded = loader.load("scope.db").expect("loads");
    assert_eq!(loaded.parameters.len(), 1);
    assert!(loaded.parameters.contains("ONLY"));
}

#[test]
fn missing_file_reports_every_location() {
    let empty = tempfile::tempdir().expect("tempdir");
    let loader = DatabaseLoader::new(
        LoaderConfig::default()
            .with_cwd(false)
            .with_search_path(empty.path())
            .with_search_path(fixture_dir()),
    )
    .with_top_dir(Some(PathBuf::from("/nonexistent-top")));
    let err = loader.load("absent.db").expect_err("not found");
    match &err {
        LoadError::NotFound { searched, .. } => {
            assert_eq!(searched.len(), 3);
            assert_eq!(searched[0], PathBuf::from("/nonexistent-top/db"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("absent.db"));
}

#[test]
fn unreadable_file_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("binary.db"), [0xff, 0xfe, 0x00]).expect("write");
    let loader = DatabaseLoader::new(
        LoaderConfig::default()
            .with_top_env(false)
            .with_cwd(false)
            .with_search_path(dir.path()),
    );
    let err = loader.load("binary.db").expect_err("invalid utf-8");
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn absolute_fixture_path() {
    let loader = DatabaseLoader::new(LoaderConfig::default().with_top_env(false).with_cwd(false));
    let path = fixture_dir().join("scope.db");
    let loaded = loader.load(&path).expect("loads");
    assert_eq!(loaded.path, path);
    assert_eq!(
        loaded.database,
        epics_db_rs::core::parse_database(&load_fixture("scope.db")).expect("parses")
    );
}
