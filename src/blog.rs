/*!
 * Blog post records as served by the content API.
 */

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::language_utils::{Language, LanguageDetector};

/// A blog post with its translatable fields
///
/// Fields other than `title`, `excerpt` and `content` (id, slug, dates,
/// image, views) are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    /// Post title
    pub title: String,

    /// Short summary shown on listing pages
    #[serde(default)]
    pub excerpt: String,

    /// Full body
    #[serde(default)]
    pub content: String,

    /// All other fields of the record
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BlogPost {
    /// Create a post with no extra fields
    pub fn new(title: impl Into<String>, excerpt: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            excerpt: excerpt.into(),
            content: content.into(),
            extra: Map::new(),
        }
    }

    /// Language of the post, judged from the title
    pub fn source_language(&self, detector: &dyn LanguageDetector) -> Language {
        detector.detect(&self.title)
    }

    /// Same record with the three text fields replaced
    pub fn with_texts(&self, title: String, excerpt: String, content: String) -> Self {
        Self {
            title,
            excerpt,
            content,
            extra: self.extra.clone(),
        }
    }
}
