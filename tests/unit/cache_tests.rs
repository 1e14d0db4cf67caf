/*!
 * Tests for translation cache functionality
 */

use chrono::Duration;
use std::sync::Arc;

use td_translate::Language;
use td_translate::translation::{CacheKey, FakeClock, TranslationCache};

fn key(text: &str) -> CacheKey {
    CacheKey::new(text, Language::En, Language::Ar)
}

fn cache_on(clock: &FakeClock) -> TranslationCache {
    TranslationCache::with_clock(true, Duration::hours(24), Arc::new(clock.clone()))
}

#[test]
fn test_cache_withDisabled_shouldNeverReturnEntries() {
    let cache = TranslationCache::new(false, Duration::hours(24));
    cache.store(&key("hello"), "مرحبا");

    assert!(cache.get(&key("hello")).is_none());
    assert!(cache.is_empty());
    assert!(!cache.is_enabled());
}

#[test]
fn test_cache_store_withEnabledCache_shouldStoreTranslation() {
    let cache = TranslationCache::default();
    cache.store(&key("hello"), "مرحبا");

    assert_eq!(cache.get(&key("hello")), Some("مرحبا".to_string()));
}

#[test]
fn test_cache_get_withDifferentPair_shouldReturnNone() {
    let cache = TranslationCache::default();
    cache.store(&key("hello"), "مرحبا");

    let reversed = CacheKey::new("hello", Language::Ar, Language::En);
    assert!(cache.get(&reversed).is_none());
}

#[test]
fn test_cache_key_withSameLengthAndPrefix_shouldCollide() {
    let prefix = "p".repeat(50);
    let first = format!("{}AAAA", prefix);
    let second = format!("{}BBBB", prefix);

    assert_eq!(key(&first), key(&second));
    assert_ne!(key(&first), key(&format!("{}BBBBB", prefix)));
}

#[test]
fn test_cache_scenarioKey_shouldMatchLanguagesLengthAndPrefix() {
    let key = CacheKey::new("Hello world", Language::En, Language::Ar);

    assert_eq!(key.source_language, Language::En);
    assert_eq!(key.target_language, Language::Ar);
    assert_eq!(key.length, 11);
    assert_eq!(key.prefix, "Hello world");
}

#[test]
fn test_cache_entry_justBeforeTtl_shouldBeLive() {
    let clock = FakeClock::default();
    let cache = cache_on(&clock);
    cache.store(&key("hello"), "مرحبا");

    clock.advance(Duration::hours(24) - Duration::seconds(1));

    assert_eq!(cache.get(&key("hello")), Some("مرحبا".to_string()));
}

#[test]
fn test_cache_entry_atTtl_shouldBeTreatedAsAbsent() {
    let clock = FakeClock::default();
    let cache = cache_on(&clock);
    cache.store(&key("hello"), "مرحبا");

    clock.advance(Duration::hours(24));

    assert!(cache.get(&key("hello")).is_none());
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_cache_clone_shouldShareStorage() {
    let cache1 = TranslationCache::default();
    let cache2 = cache1.clone();

    cache1.store(&key("hello"), "مرحبا");

    assert_eq!(cache2.get(&key("hello")), Some("مرحبا".to_string()));
}

#[test]
fn test_cache_clear_shouldResetEntriesAndStats() {
    let cache = TranslationCache::default();
    cache.store(&key("hello"), "مرحبا");
    cache.get(&key("hello"));
    cache.get(&key("missing"));

    cache.clear();

    assert!(cache.is_empty());
    assert_eq!(cache.stats(), (0, 0, 0.0));
}

#[tokio::test]
async fn test_cache_concurrent_access_shouldBeThreadSafe() {
    use tokio::task::JoinSet;

    let cache = TranslationCache::default();
    let mut join_set = JoinSet::new();

    for i in 0..10 {
        let cache = cache.clone();
        join_set.spawn(async move {
            cache.store(&key(&format!("key{}", i)), &format!("value{}", i));
        });
    }

    while join_set.join_next().await.is_some() {}

    for i in 0..10 {
        assert_eq!(
            cache.get(&key(&format!("key{}", i))),
            Some(format!("value{}", i))
        );
    }
}
