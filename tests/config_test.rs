//! 設定ファイルのテスト

use store_assess::config::{Config, ENDPOINT_ENV};
use store_assess::error::AssessError;
use tempfile::tempdir;

/// ファイルが無ければ既定値
#[test]
fn test_load_missing_file_returns_default() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).expect("読み込み失敗");

    assert_eq!(config, Config::default());
    assert_eq!(config.timeout_seconds, 180);
}

/// 保存と読み込み（親ディレクトリも作る）
#[test]
fn test_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("config.json");

    let mut config = Config::default();
    config.set_endpoint("https://assess.example.com/api/evaluate".into()).unwrap();
    config.set_timeout(60).unwrap();
    config.save_to(&path).expect("保存失敗");

    let loaded = Config::load_from(&path).expect("読み込み失敗");
    assert_eq!(loaded, config);
}

/// 一部の項目だけのファイルでも読める
#[test]
fn test_load_partial_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "timeout_seconds": 30 }"#).unwrap();

    let config = Config::load_from(&path).expect("読み込み失敗");
    assert_eq!(config.timeout_seconds, 30);
    assert_eq!(config.endpoint, Config::default().endpoint);
}

#[test]
fn test_load_broken_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(Config::load_from(&path), Err(AssessError::JsonParse(_))));
}

#[test]
fn test_set_endpoint_rejects_non_http() {
    let mut config = Config::default();
    let result = config.set_endpoint("ftp://example.com".into());

    assert!(matches!(result, Err(AssessError::Config(_))));
    assert_eq!(config.endpoint, Config::default().endpoint);
}

#[test]
fn test_set_timeout_rejects_zero() {
    let mut config = Config::default();
    assert!(config.set_timeout(0).is_err());
}

/// 環境変数が設定ファイルより優先される
#[test]
fn test_endpoint_env_override() {
    let config = Config::default();

    std::env::set_var(ENDPOINT_ENV, "https://override.example.com/api/evaluate");
    assert_eq!(config.endpoint(), "https://override.example.com/api/evaluate");

    std::env::set_var(ENDPOINT_ENV, "  ");
    assert_eq!(config.endpoint(), config.endpoint, "空白のみは無視");

    std::env::remove_var(ENDPOINT_ENV);
    assert_eq!(config.endpoint(), config.endpoint);
}
