/*!
 * Translation caching functionality.
 *
 * Translated texts are kept in process memory for a fixed time-to-live so
 * that repeated renders of the same content do not spend upstream quota.
 * Expired entries are not evicted; they are ignored on lookup and
 * overwritten by the next successful translation.
 */

use chrono::{DateTime, Duration, Utc};
use log::debug;
use parking_lot::{Mutex, RwLock};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::language_utils::Language;

/// Number of leading characters of the source text that enter the key
pub const KEY_PREFIX_CHARS: usize = 50;

/// Default time-to-live of a cache entry
pub const DEFAULT_TTL_SECS: i64 = 24 * 60 * 60;

/// Source of the current time, injectable for tests
pub trait Clock: Send + Sync + Debug {
    /// Current time
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock
#[derive(Debug, Clone)]
pub struct FakeClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl FakeClock {
    /// Create a clock frozen at `start`
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

/// Cache key derived from the language pair, the text length and a text prefix
///
/// Two texts with the same length and the same first 50 characters share a
/// key. This is an accepted approximation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Source language
    pub source_language: Language,

    /// Target language
    pub target_language: Language,

    /// Length of the source text in characters
    pub length: usize,

    /// First characters of the source text
    pub prefix: String,
}

impl CacheKey {
    /// Create the key for a text and language pair
    pub fn new(text: &str, source_language: Language, target_language: Language) -> Self {
        Self {
            source_language,
            target_language,
            length: text.chars().count(),
            prefix: text.chars().take(KEY_PREFIX_CHARS).collect(),
        }
    }

    /// Hex SHA-256 fingerprint of the key components
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.source_language.code().as_bytes());
        hasher.update(b"_");
        hasher.update(self.target_language.code().as_bytes());
        hasher.update(b"_");
        hasher.update(self.length.to_string().as_bytes());
        hasher.update(b"_");
        hasher.update(self.prefix.as_bytes());

        format!("{:x}", hasher.finalize())
    }
}

/// A cached translation and the time it was stored
#[derive(Debug, Clone)]
struct CacheEntry {
    text: String,
    created_at: DateTime<Utc>,
}

/// Translation cache for storing and retrieving translations
///
/// Clones share the same storage and counters.
#[derive(Debug, Clone)]
pub struct TranslationCache {
    /// Entries by key fingerprint
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,

    /// Cache hit counter
    hits: Arc<AtomicUsize>,

    /// Cache miss counter
    misses: Arc<AtomicUsize>,

    /// Entry lifetime
    ttl: Duration,

    /// Time source
    clock: Arc<dyn Clock>,

    /// Whether caching is enabled
    enabled: bool,
}

impl TranslationCache {
    /// Create a new translation cache on the system clock
    pub fn new(enabled: bool, ttl: Duration) -> Self {
        Self::with_clock(enabled, ttl, Arc::new(SystemClock))
    }

    /// Create a new translation cache on the given clock
    pub fn with_clock(enabled: bool, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            hits: Arc::new(AtomicUsize::new(0)),
            misses: Arc::new(AtomicUsize::new(0)),
            ttl,
            clock,
            enabled,
        }
    }

    /// Get a live translation from the cache
    pub fn get(&self, key: &CacheKey) -> Option<String> {
        if !self.enabled {
            return None;
        }

        let now = self.clock.now();
        let entries = self.entries.read();

        match entries.get(&key.fingerprint()) {
            Some(entry) if now - entry.created_at < self.ttl => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(
                    "Cache hit for '{}' ({} -> {})",
                    truncate_text(&key.prefix, 30),
                    key.source_language,
                    key.target_language
                );
                Some(entry.text.clone())
            }
            Some(_) => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!(
                    "Cache entry expired for '{}' ({} -> {})",
                    truncate_text(&key.prefix, 30),
                    key.source_language,
                    key.target_language
                );
                None
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!(
                    "Cache miss for '{}' ({} -> {})",
                    truncate_text(&key.prefix, 30),
                    key.source_language,
                    key.target_language
                );
                None
            }
        }
    }

    /// Store a translation stamped with the current time, replacing any
    /// previous entry for the key
    pub fn store(&self, key: &CacheKey, translation: &str) {
        if !self.enabled {
            return;
        }

        let entry = CacheEntry {
            text: translation.to_string(),
            created_at: self.clock.now(),
        };
        self.entries.write().insert(key.fingerprint(), entry);

        debug!(
            "Cached translation for '{}' ({} -> {})",
            truncate_text(&key.prefix, 30),
            key.source_language,
            key.target_language
        );
    }

    /// Whether an entry exists for the key, live or expired
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.read().contains_key(&key.fingerprint())
    }

    /// Get cache statistics as (hits, misses, hit rate)
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;

        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        (hits, misses, hit_rate)
    }

    /// Clear the cache and its counters
    pub fn clear(&self) {
        self.entries.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);

        debug!("Translation cache cleared");
    }

    /// Number of stored entries, expired ones included
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Check if the cache is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Entry lifetime
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new(true, Duration::seconds(DEFAULT_TTL_SECS))
    }
}

/// Truncate text to a maximum number of characters with ellipsis
fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    }
}
