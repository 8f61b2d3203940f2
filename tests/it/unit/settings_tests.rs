//! Unit tests for settings loading.

use chipdex::data::{DataError, SourceSpec};
use chipdex::settings::{CatalogSettings, default_settings_path};
use chipdex::Family;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_load_from_file_sets_base_dir() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        r#"{
            "sources": [
                { "label": "bipolar", "family": "ttl", "address": "data/ttl.csv" },
                { "label": "cmos", "family": "cmos", "address": "https://example.com/cmos.csv" }
            ],
            "page_size": 12,
            "image_root": "https://cdn.example.com/img"
        }"#,
    )?;

    let settings = CatalogSettings::load_from(&path)?;
    assert_eq!(settings.page_size, 12);
    assert_eq!(settings.image_root, "https://cdn.example.com/img");
    assert_eq!(
        settings.sources[0],
        SourceSpec::new(Family::Ttl, "data/ttl.csv").with_label("bipolar")
    );
    assert!(settings.sources[1].is_remote());
    assert_eq!(settings.base_dir.as_deref(), Some(dir.path()));
    assert_eq!(
        settings.file_fetcher().resolve("data/ttl.csv"),
        dir.path().join("data/ttl.csv")
    );
    Ok(())
}

#[test]
fn test_load_from_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let result = CatalogSettings::load_from(&dir.path().join("absent.json"));
    assert!(matches!(result, Err(DataError::Io(_))));
}

#[test]
fn test_load_from_invalid_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(CatalogSettings::load_from(&path), Err(DataError::Json(_))));
}

#[test]
fn test_empty_address_rejected() {
    let json = r#"{ "sources": [{ "label": "ttl", "family": "ttl", "address": "  " }] }"#;
    match CatalogSettings::from_json(json) {
        Err(DataError::Settings(message)) => assert!(message.contains("ttl")),
        other => panic!("Expected Settings error, got {:?}", other),
    }
}

#[test]
fn test_default_settings_path() {
    // Returns Some on most systems
    let path = default_settings_path();
    assert!(path.is_none() || path.unwrap().ends_with("chipdex/settings.json"));
}
