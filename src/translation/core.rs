/*!
 * Core translation service implementation.
 *
 * `TranslationService` is the cache-aside orchestrator: it resolves the
 * language pair, answers from the cache when it can, and otherwise chunks
 * the text, translates the chunks one after another through the upstream
 * gate, rejoins them and caches the result.
 *
 * The service never fails loudly. `translate` returns
 * `Result<Translation, Fallback>` where the fallback carries the original
 * text, and `translate_text` collapses that into a plain `String`.
 */

use anyhow::{Context, Result};
use log::{debug, error};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::app_config::TranslationConfig;
use crate::blog::BlogPost;
use crate::errors::{ProviderError, TranslationError};
use crate::language_utils::{Language, LanguageDetector, ScriptDetector};
use crate::providers::Provider;
use crate::providers::mymemory::MyMemory;
use super::cache::{CacheKey, TranslationCache};
use super::chunker::{self, DEFAULT_MAX_CHUNK_CHARS};
use super::concurrency::{DEFAULT_MAX_CONCURRENT_REQUESTS, RequestGate};

/// Pause between consecutive chunk requests of one text
pub const DEFAULT_CHUNK_DELAY_MS: u64 = 100;

/// A request to translate one text
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    /// Text to translate
    pub text: String,
    /// Language of the text; detected when absent
    pub source_language: Option<Language>,
    /// Language to translate into
    pub target_language: Language,
}

impl TranslationRequest {
    /// Create a request with a detected source language
    pub fn new(text: impl Into<String>, target_language: Language) -> Self {
        Self {
            text: text.into(),
            source_language: None,
            target_language,
        }
    }

    /// Fix the source language
    pub fn from_language(mut self, source_language: Language) -> Self {
        self.source_language = Some(source_language);
        self
    }
}

/// Where a returned text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationOrigin {
    /// Input returned as is: blank text or same language pair
    Passthrough,
    /// Live cache entry
    Cache,
    /// Fresh upstream translation
    Provider,
}

/// A successful translation result
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    /// The resulting text
    pub text: String,
    /// Where it came from
    pub origin: TranslationOrigin,
}

impl Translation {
    fn passthrough(text: &str) -> Self {
        Self {
            text: text.to_string(),
            origin: TranslationOrigin::Passthrough,
        }
    }
}

/// The original text, handed back when a translation was aborted
#[derive(Error, Debug)]
#[error("translation aborted, original text kept: {error}")]
pub struct Fallback {
    /// The untranslated input
    pub original: String,
    /// Why the translation was aborted
    #[source]
    pub error: TranslationError,
}

impl Fallback {
    /// The untranslated input
    pub fn into_original(self) -> String {
        self.original
    }
}

/// Tunables of the orchestrator
#[derive(Debug, Clone)]
pub struct TranslationOptions {
    /// Maximum chunk size in characters
    pub max_chunk_chars: usize,

    /// Pause between consecutive chunk requests
    pub chunk_delay: Duration,

    /// Upstream requests allowed in flight
    pub max_concurrent_requests: usize,
}

impl Default for TranslationOptions {
    fn default() -> Self {
        Self {
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
            chunk_delay: Duration::from_millis(DEFAULT_CHUNK_DELAY_MS),
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }
}

impl From<&TranslationConfig> for TranslationOptions {
    fn from(config: &TranslationConfig) -> Self {
        Self {
            max_chunk_chars: config.max_chunk_chars,
            chunk_delay: config.chunk_delay(),
            max_concurrent_requests: config.max_concurrent_requests,
        }
    }
}

/// Cache-aside translation orchestrator
///
/// Clones share the provider, the cache and the upstream gate.
#[derive(Debug, Clone)]
pub struct TranslationService {
    /// Chunk translator
    provider: Arc<dyn Provider>,

    /// Translated text by fingerprint
    cache: TranslationCache,

    /// Source language inference
    detector: Arc<dyn LanguageDetector>,

    /// Serializes upstream calls
    gate: RequestGate,

    /// Tunables
    pub options: TranslationOptions,
}

impl TranslationService {
    /// Create a service with a fresh cache and the script detector
    pub fn new(provider: Arc<dyn Provider>, options: TranslationOptions) -> Self {
        Self {
            provider,
            cache: TranslationCache::default(),
            detector: Arc::new(ScriptDetector),
            gate: RequestGate::new(options.max_concurrent_requests),
            options,
        }
    }

    /// Create a MyMemory-backed service from configuration
    pub fn from_config(config: &TranslationConfig) -> Result<Self> {
        let endpoint = config
            .endpoint_url()
            .context("Invalid translation endpoint")?;
        let provider = MyMemory::new(endpoint, Duration::from_secs(config.timeout_secs))
            .with_email(config.email.clone());
        let cache = TranslationCache::new(config.cache.enabled, config.cache_ttl());

        Ok(Self::new(Arc::new(provider), TranslationOptions::from(config)).with_cache(cache))
    }

    /// Use the given cache
    pub fn with_cache(mut self, cache: TranslationCache) -> Self {
        self.cache = cache;
        self
    }

    /// Use the given language detector
    pub fn with_detector(mut self, detector: Arc<dyn LanguageDetector>) -> Self {
        self.detector = detector;
        self
    }

    /// Share an upstream gate with other services
    pub fn with_gate(mut self, gate: RequestGate) -> Self {
        self.gate = gate;
        self
    }

    /// The translation cache
    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    /// The upstream gate
    pub fn gate(&self) -> &RequestGate {
        &self.gate
    }

    /// The chunk translator
    pub fn provider(&self) -> &Arc<dyn Provider> {
        &self.provider
    }

    /// Check that the provider answers
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        self.provider.test_connection().await
    }

    /// Translate a text, reporting an aborted translation as a fallback
    ///
    /// # Arguments
    /// * `text` - Text to translate
    /// * `target_language` - Language to translate into
    /// * `source_language` - Language of the text; detected when `None`
    pub async fn translate(
        &self,
        text: &str,
        target_language: Language,
        source_language: Option<Language>,
    ) -> Result<Translation, Fallback> {
        if text.trim().is_empty() {
            return Ok(Translation::passthrough(text));
        }

        let source_language = source_language.unwrap_or_else(|| self.detector.detect(text));
        if source_language == target_language {
            return Ok(Translation::passthrough(text));
        }

        let key = CacheKey::new(text, source_language, target_language);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(Translation {
                text: cached,
                origin: TranslationOrigin::Cache,
            });
        }

        match self.translate_chunks(text, source_language, target_language).await {
            Ok(translated) => {
                self.cache.store(&key, &translated);
                Ok(Translation {
                    text: translated,
                    origin: TranslationOrigin::Provider,
                })
            }
            Err(e) => {
                error!("Translation error ({} -> {}): {}", source_language, target_language, e);
                Err(Fallback {
                    original: text.to_string(),
                    error: e,
                })
            }
        }
    }

    /// Translate a text, returning the original on any failure
    pub async fn translate_text(
        &self,
        text: &str,
        target_language: Language,
        source_language: Option<Language>,
    ) -> String {
        match self.translate(text, target_language, source_language).await {
            Ok(translation) => translation.text,
            Err(fallback) => fallback.into_original(),
        }
    }

    /// Translate a request value
    pub async fn translate_request(&self, request: &TranslationRequest) -> Result<Translation, Fallback> {
        self.translate(&request.text, request.target_language, request.source_language)
            .await
    }

    /// Chunk, translate sequentially and rejoin with newlines
    async fn translate_chunks(
        &self,
        text: &str,
        source_language: Language,
        target_language: Language,
    ) -> Result<String, TranslationError> {
        let chunks = chunker::split_into_chunks(text, self.options.max_chunk_chars);
        debug!(
            "Translating {} chars in {} chunk(s) via {} ({} -> {})",
            text.chars().count(),
            chunks.len(),
            self.provider.name(),
            source_language,
            target_language
        );

        let mut translated = Vec::with_capacity(chunks.len());
        for (index, chunk) in chunks.iter().enumerate() {
            let result = self
                .gate
                .run(self.provider.translate_chunk(chunk, source_language, target_language))
                .await?;
            translated.push(result?);

            if index + 1 < chunks.len() && !self.options.chunk_delay.is_zero() {
                tokio::time::sleep(self.options.chunk_delay).await;
            }
        }

        Ok(translated.join("\n"))
    }

    /// Translate the title, excerpt and content of a post
    ///
    /// The source language is taken from the title. A post already in the
    /// target language is returned unchanged. Fields are translated one
    /// after another.
    pub async fn translate_blog_post(&self, post: &BlogPost, target_language: Language) -> BlogPost {
        let source_language = post.source_language(self.detector.as_ref());
        if source_language == target_language {
            return post.clone();
        }

        let title = self
            .translate_text(&post.title, target_language, Some(source_language))
            .await;
        let excerpt = self
            .translate_text(&post.excerpt, target_language, Some(source_language))
            .await;
        let content = self
            .translate_text(&post.content, target_language, Some(source_language))
            .await;

        post.with_texts(title, excerpt, content)
    }
}
