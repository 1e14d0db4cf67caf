use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::file_utils::FileManager;
use crate::language_utils::Language;
use crate::providers::mymemory::MYMEMORY_API_URL;
use crate::translation::batch::DEFAULT_POST_CONCURRENCY;
use crate::translation::cache::DEFAULT_TTL_SECS;
use crate::translation::chunker::DEFAULT_MAX_CHUNK_CHARS;
use crate::translation::concurrency::DEFAULT_MAX_CONCURRENT_REQUESTS;
use crate::translation::core::DEFAULT_CHUNK_DELAY_MS;

// Application configuration module
// This module handles loading, validating and saving the JSON
// configuration file.

/// Longest accepted cache lifetime (one year)
const MAX_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language used when a command does not name a target
    #[serde(default = "default_target_language")]
    pub default_target_language: Language,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation API endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Contact email sent with each request; raises the free daily quota
    #[serde(default)]
    pub email: Option<String>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum characters per upstream request
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,

    /// Delay in milliseconds between consecutive chunk requests
    #[serde(default = "default_chunk_delay_ms")]
    pub chunk_delay_ms: u64,

    /// Upstream requests allowed in flight across the whole process
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,

    /// Posts translated concurrently by batch commands
    #[serde(default = "default_post_concurrency")]
    pub post_concurrency: usize,

    /// Translation cache settings
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            email: None,
            timeout_secs: default_timeout_secs(),
            max_chunk_chars: default_max_chunk_chars(),
            chunk_delay_ms: default_chunk_delay_ms(),
            max_concurrent_requests: default_max_concurrent_requests(),
            post_concurrency: default_post_concurrency(),
            cache: CacheConfig::default(),
        }
    }
}

/// Translation cache settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheConfig {
    /// Whether finished translations are cached
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Entry lifetime in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: default_ttl_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_target_language() -> Language {
    Language::En
}

fn default_endpoint() -> String {
    MYMEMORY_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_chunk_chars() -> usize {
    DEFAULT_MAX_CHUNK_CHARS
}

fn default_chunk_delay_ms() -> u64 {
    DEFAULT_CHUNK_DELAY_MS
}

fn default_max_concurrent_requests() -> usize {
    DEFAULT_MAX_CONCURRENT_REQUESTS
}

fn default_post_concurrency() -> usize {
    DEFAULT_POST_CONCURRENCY
}

fn default_ttl_secs() -> u64 {
    DEFAULT_TTL_SECS as u64
}

fn default_true() -> bool {
    true
}

impl TranslationConfig {
    /// Parsed endpoint URL
    pub fn endpoint_url(&self) -> Result<Url> {
        let url = Url::parse(&self.endpoint)
            .with_context(|| format!("Invalid endpoint URL: {}", self.endpoint))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(anyhow!("Unsupported endpoint scheme '{}': {}", scheme, self.endpoint)),
        }
    }

    /// Pause between chunk requests
    pub fn chunk_delay(&self) -> Duration {
        Duration::from_millis(self.chunk_delay_ms)
    }

    /// Cache entry lifetime
    pub fn cache_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.cache.ttl_secs.min(MAX_TTL_SECS) as i64)
    }
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let translation = &self.translation;

        translation.endpoint_url()?;

        if translation.max_chunk_chars == 0 {
            return Err(anyhow!("max_chunk_chars must be greater than zero"));
        }
        if translation.max_concurrent_requests == 0 {
            return Err(anyhow!("max_concurrent_requests must be greater than zero"));
        }
        if translation.post_concurrency == 0 {
            return Err(anyhow!("post_concurrency must be greater than zero"));
        }
        if translation.timeout_secs == 0 {
            return Err(anyhow!("timeout_secs must be greater than zero"));
        }
        if translation.cache.ttl_secs == 0 || translation.cache.ttl_secs > MAX_TTL_SECS {
            return Err(anyhow!(
                "cache.ttl_secs must be between 1 and {}",
                MAX_TTL_SECS
            ));
        }
        if let Some(email) = &translation.email {
            let looks_valid = email.contains('@')
                && !email.starts_with('@')
                && !email.ends_with('@')
                && !email.chars().any(char::is_whitespace);
            if !looks_valid {
                return Err(anyhow!("Invalid contact email: {}", email));
            }
        }

        Ok(())
    }

    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Write the configuration as pretty JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        FileManager::write_to_file(path, &json)
    }

    /// Load the configuration, writing a default one first if the file is
    /// missing. The flag tells whether the file was created.
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<(Self, bool)> {
        let path = path.as_ref();
        if FileManager::file_exists(path) {
            return Ok((Self::from_file(path)?, false));
        }

        let config = Self::default();
        config.save_to_file(path)?;
        Ok((config, true))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            default_target_language: default_target_language(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
