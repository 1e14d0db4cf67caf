/*!
 * # td-translate
 *
 * On-demand Arabic/English translation for the content of a bilingual
 * logistics website.
 *
 * ## Features
 *
 * - Splits long texts into size-bounded chunks at paragraph and sentence
 *   boundaries
 * - Translates chunks through the MyMemory API, one request at a time
 * - Caches finished translations in memory for 24 hours
 * - Detects Arabic source text by script
 * - Never fails loudly: on any transport error the original text is kept
 * - Translates blog posts, alone or in batches
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `translation`: The translation pipeline:
 *   - `translation::chunker`: Paragraph and sentence chunking
 *   - `translation::cache`: Time-bounded translation cache
 *   - `translation::concurrency`: Upstream request gate
 *   - `translation::core`: Cache-aside orchestrator
 *   - `translation::batch`: Concurrent translation of post lists
 *   - `translation::api`: Translate endpoint contract
 * - `providers`: Chunk translators:
 *   - `providers::mymemory`: MyMemory API client
 *   - `providers::mock`: Scripted provider for tests
 * - `blog`: Blog post records
 * - `language_utils`: Site languages and detection
 * - `app_controller`: Command runner used by the binary
 * - `file_utils`: JSON input and output helpers
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod blog;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use blog::BlogPost;
pub use errors::{ProviderError, TranslationError};
pub use language_utils::{Language, LanguageDetector, ScriptDetector};
pub use translation::{Fallback, Translation, TranslationCache, TranslationService};
