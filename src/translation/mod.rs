/*!
 * Chunked translation pipeline with caching.
 *
 * - `chunker`: splits long text at paragraph and sentence boundaries
 * - `cache`: time-bounded cache of finished translations
 * - `concurrency`: the gate that serializes upstream requests
 * - `core`: the cache-aside orchestrator and blog post translation
 * - `batch`: item-level concurrent translation of post lists
 * - `api`: JSON contract of the translate endpoint
 */

// Re-export main types for easier usage
pub use self::api::{TranslateRequest, TranslateResponse, handle_translate_request};
pub use self::batch::BatchTranslator;
pub use self::cache::{CacheKey, Clock, FakeClock, SystemClock, TranslationCache};
pub use self::chunker::split_into_chunks;
pub use self::concurrency::RequestGate;
pub use self::core::{
    Fallback, Translation, TranslationOptions, TranslationOrigin, TranslationRequest,
    TranslationService,
};

// Submodules
pub mod api;
pub mod batch;
pub mod cache;
pub mod chunker;
pub mod concurrency;
pub mod core;
