/*!
 * Provider implementations for translation services.
 *
 * - `mymemory`: the MyMemory free translation API
 * - `mock`: scripted provider for tests and offline runs
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;
use crate::language_utils::Language;

/// Common trait for all chunk translators
///
/// An implementation sends exactly one upstream request per call and does
/// not retry. Transport failures are returned as errors. Application-level
/// failures reported inside a successful response are absorbed by returning
/// the original chunk text.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Short provider name for logs
    fn name(&self) -> &str;

    /// Translate one size-bounded chunk
    ///
    /// # Arguments
    /// * `text` - The chunk to translate
    /// * `source_language` - Language the chunk is written in
    /// * `target_language` - Language to translate into
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated chunk, the original
    ///   chunk on a soft failure, or a transport error
    async fn translate_chunk(
        &self,
        text: &str,
        source_language: Language,
        target_language: Language,
    ) -> Result<String, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

pub mod mock;
pub mod mymemory;
