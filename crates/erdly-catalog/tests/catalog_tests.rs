//! Integration tests for native limit catalogs
//!
//! These exercise the catalogs the way the engine consumes them: through
//! `&dyn NativeLimits`, built from configuration files.

use erdly_catalog::{EngineCatalog, NativeLimits, NoNativeLimits, StaticLimits};
use erdly_core::{ColumnType, Config, DialectConfig};
use pretty_assertions::assert_eq;
use std::sync::Arc;

// =============================================================================
// Helper Functions
// =============================================================================

fn lookup_all(catalog: &dyn NativeLimits) -> Vec<Option<u32>> {
    [
        ColumnType::String,
        ColumnType::Text,
        ColumnType::Integer,
        ColumnType::Binary,
    ]
    .iter()
    .map(|t| catalog.native_limit(t))
    .collect()
}

// =============================================================================
// Engine tables
// =============================================================================

#[test]
fn test_engine_tables_through_trait_objects() {
    assert_eq!(lookup_all(&EngineCatalog::Mysql), vec![Some(255), None, Some(4), None]);
    assert_eq!(lookup_all(&EngineCatalog::Postgres), vec![None, None, Some(4), None]);
    assert_eq!(lookup_all(&EngineCatalog::Sqlite), vec![None, None, None, None]);
    assert_eq!(lookup_all(&NoNativeLimits), vec![None, None, None, None]);
}

#[test]
fn test_other_types_have_no_native_limit() {
    let geometry = ColumnType::from("geometry");
    assert_eq!(EngineCatalog::Mysql.native_limit(&geometry), None);
}

// =============================================================================
// Configured catalogs
// =============================================================================

#[test]
fn test_catalog_from_toml_config() {
    let config = Config::from_toml(
        r#"
        dialect = "postgres"

        [native_limits]
        string = 456
        "#,
    )
    .unwrap();

    let catalog = StaticLimits::from_config(&config);
    assert_eq!(catalog.name(), "PostgreSQL");
    assert_eq!(lookup_all(&catalog), vec![Some(456), None, Some(4), None]);
}

#[test]
fn test_default_config_suppresses_nothing() {
    let catalog = StaticLimits::from_config(&Config::default());
    assert!(catalog.is_empty());
    assert_eq!(lookup_all(&catalog), lookup_all(&NoNativeLimits));
}

#[test]
fn test_config_file_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("erdly.toml");
    std::fs::write(&path, "dialect = \"mysql\"\n[native_limits]\nstring = 191\n").unwrap();

    let config = Config::from_file(&path).unwrap();
    let catalog = StaticLimits::from_config(&config);
    assert_eq!(catalog.native_limit(&ColumnType::String), Some(191));
    assert_eq!(catalog.native_limit(&ColumnType::Integer), Some(4));
}

#[test]
fn test_saved_config_builds_same_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("erdly.toml");

    let mut config = Config::default();
    config.dialect = DialectConfig::Sqlite;
    config.native_limits.insert("binary".to_string(), 1024);
    config.save_to_file(&path).unwrap();

    let reloaded = StaticLimits::from_config(&Config::from_file(&path).unwrap());
    assert_eq!(lookup_all(&reloaded), lookup_all(&StaticLimits::from_config(&config)));
    assert_eq!(reloaded.native_limit(&ColumnType::Binary), Some(1024));
}

// =============================================================================
// Sharing
// =============================================================================

#[test]
fn test_catalog_shared_across_threads() {
    let catalog: Arc<dyn NativeLimits> = Arc::new(StaticLimits::new().with_limit(ColumnType::String, 80));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let catalog = Arc::clone(&catalog);
            std::thread::spawn(move || catalog.native_limit(&ColumnType::String))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Some(80));
    }
}
