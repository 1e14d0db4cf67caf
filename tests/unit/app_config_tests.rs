/*!
 * Tests for application configuration functionality
 */

use td_translate::Language;
use td_translate::app_config::{Config, LogLevel};
use td_translate::providers::mymemory::MYMEMORY_API_URL;

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.default_target_language, Language::En);
    assert_eq!(config.translation.endpoint, MYMEMORY_API_URL);
    assert_eq!(config.translation.max_chunk_chars, 450);
    assert_eq!(config.translation.chunk_delay_ms, 100);
    assert_eq!(config.translation.max_concurrent_requests, 1);
    assert!(config.translation.cache.enabled);
    assert_eq!(config.translation.cache.ttl_secs, 24 * 60 * 60);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validation_withBadValues_shouldFail() {
    let mut config = Config::default();
    config.translation.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.translation.endpoint = "ftp://example.com/get".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.translation.max_chunk_chars = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.translation.max_concurrent_requests = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.translation.cache.ttl_secs = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.translation.email = Some("not an email".to_string());
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.translation.email = Some("ops@example.com".to_string());
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_config_file_shouldFillDefaults() {
    let json = r#"{
        "default_target_language": "ar",
        "translation": { "chunk_delay_ms": 250, "cache": { "enabled": false } },
        "log_level": "debug"
    }"#;

    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.default_target_language, Language::Ar);
    assert_eq!(config.translation.chunk_delay_ms, 250);
    assert_eq!(config.translation.max_chunk_chars, 450);
    assert!(!config.translation.cache.enabled);
    assert_eq!(config.translation.cache.ttl_secs, 86_400);
    assert_eq!(config.log_level, LogLevel::Debug);
}

#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");

    let (config, created) = Config::load_or_create(&path).unwrap();
    assert!(created);
    assert!(path.exists());
    assert_eq!(config.translation.max_chunk_chars, 450);

    let (reloaded, created) = Config::load_or_create(&path).unwrap();
    assert!(!created);
    assert_eq!(reloaded.translation.endpoint, config.translation.endpoint);
}

#[test]
fn test_save_and_load_shouldRoundTripChanges() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("nested").join("conf.json");

    let mut config = Config::default();
    config.translation.email = Some("ops@example.com".to_string());
    config.translation.post_concurrency = 2;
    config.save_to_file(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert_eq!(loaded.translation.email.as_deref(), Some("ops@example.com"));
    assert_eq!(loaded.translation.post_concurrency, 2);
}

#[test]
fn test_from_file_withInvalidJson_shouldFail() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(dir.path(), "conf.json", "{ not json").unwrap();

    assert!(Config::from_file(&path).is_err());
}

#[test]
fn test_cache_ttl_shouldConvertSeconds() {
    let config = Config::default();
    assert_eq!(config.translation.cache_ttl(), chrono::Duration::hours(24));
    assert_eq!(config.translation.chunk_delay().as_millis(), 100);
}
