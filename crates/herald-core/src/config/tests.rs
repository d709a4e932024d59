//! Tests for configuration loading

use super::*;
use crate::error::ConfigError;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_defaults() {
    let config = EngineConfig::default();
    assert_eq!(config.worker_threads, 4);
    assert_eq!(config.completion_cache.ttl(), Duration::from_secs(5));
    assert_eq!(config.completion_cache.max_entries, 256);
    assert!(config.completion_cache.enabled());
    assert_eq!(config.logging.level, "info");
    assert!(config.declared_roots.is_empty());
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_document_keeps_defaults() {
    let config = EngineConfig::from_toml_str(
        r#"
        worker_threads = 2
        declared_roots = ["shop", "guild"]

        [messages]
        permission_denied = "Nope."
        "#,
    )
    .unwrap();

    assert_eq!(config.worker_threads, 2);
    assert_eq!(config.declared_roots, vec!["shop", "guild"]);
    assert_eq!(config.messages.permission_denied, "Nope.");
    assert_eq!(
        config.messages.handler_error,
        MessagesConfig::default().handler_error
    );
    assert_eq!(config.completion_cache, CompletionCacheConfig::default());
}

#[test]
fn test_zero_workers_rejected() {
    let err = EngineConfig::from_toml_str("worker_threads = 0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));
    assert!(err.to_string().contains("worker_threads"));
}

#[test]
fn test_blank_root_rejected() {
    let err = EngineConfig::from_toml_str(r#"declared_roots = ["shop", "  "]"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));

    let err = EngineConfig::from_toml_str(r#"declared_roots = ["shop buy"]"#).unwrap_err();
    assert!(err.to_string().contains("single tokens"));
}

#[test]
fn test_unknown_log_format_rejected() {
    let err = EngineConfig::from_toml_str(
        r#"
        [logging]
        format = "xml"
        "#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("logging.format"));
}

#[test]
fn test_disabled_cache_allows_zero_entries() {
    let config = EngineConfig::from_toml_str(
        r#"
        [completion_cache]
        ttl_ms = 0
        max_entries = 0
        "#,
    )
    .unwrap();
    assert!(!config.completion_cache.enabled());
    assert_eq!(config.completion_cache, CompletionCacheConfig::disabled());
}

#[test]
fn test_parse_error() {
    let err = EngineConfig::from_toml_str("worker_threads = \"many\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { path: None, .. }));
}

#[test]
fn test_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("herald.toml");
    fs::write(
        &path,
        r#"
        worker_threads = 8

        [completion_cache]
        ttl_ms = 250

        [logging]
        level = "debug"
        format = "json"
        "#,
    )
    .unwrap();

    let config = EngineConfig::load(&path).unwrap();
    assert_eq!(config.worker_threads, 8);
    assert_eq!(config.completion_cache.ttl(), Duration::from_millis(250));
    assert_eq!(config.completion_cache.max_entries, 256);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, "json");
}

#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing.toml");

    let err = EngineConfig::load(&path).unwrap_err();
    match err {
        ConfigError::Read { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_load_reports_path_on_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");
    fs::write(&path, "worker_threads = [").unwrap();

    let err = EngineConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { path: Some(_), .. }));
}

#[test]
fn test_builder_overrides() {
    let config = EngineConfig::default()
        .with_worker_threads(1)
        .with_declared_roots(["warp"]);
    assert_eq!(config.worker_threads, 1);
    assert_eq!(config.declared_roots, vec!["warp"]);
}
