/*!
 * Batch translation of blog posts.
 *
 * A listing page needs many posts at once. Posts are translated
 * concurrently at the item level, while every upstream call still passes
 * the service's request gate, so the API never sees more parallel requests
 * than the gate allows.
 */

use futures::stream::{self, StreamExt};
use log::info;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use crate::blog::BlogPost;
use crate::language_utils::Language;

use super::core::TranslationService;

/// Default number of posts translated concurrently
pub const DEFAULT_POST_CONCURRENCY: usize = 4;

/// Batch translator for lists of blog posts
pub struct BatchTranslator {
    /// The translation service to use
    service: TranslationService,

    /// Maximum number of posts in progress at once
    max_concurrent_posts: usize,
}

impl BatchTranslator {
    /// Create a new batch translator
    pub fn new(service: TranslationService, max_concurrent_posts: usize) -> Self {
        Self {
            service,
            max_concurrent_posts: max_concurrent_posts.max(1),
        }
    }

    /// Posts in progress at once
    pub fn max_concurrent_posts(&self) -> usize {
        self.max_concurrent_posts
    }

    /// Translate posts, keeping their order
    ///
    /// `progress_callback` receives (completed, total) after each post.
    pub async fn translate_posts(
        &self,
        posts: &[BlogPost],
        target_language: Language,
        progress_callback: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> Vec<BlogPost> {
        let total = posts.len();
        let completed = Arc::new(AtomicUsize::new(0));
        let start_time = Instant::now();

        let mut results = stream::iter(posts.iter().enumerate())
            .map(|(index, post)| {
                let service = self.service.clone();
                let completed = completed.clone();
                let progress_callback = progress_callback.clone();

                async move {
                    let translated = service.translate_blog_post(post, target_language).await;
                    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    progress_callback(done, total);
                    (index, translated)
                }
            })
            .buffer_unordered(self.max_concurrent_posts)
            .collect::<Vec<_>>()
            .await;

        results.sort_by_key(|(index, _)| *index);

        info!(
            "Translated {} post(s) to {} in {:?}",
            total,
            target_language,
            start_time.elapsed()
        );

        results.into_iter().map(|(_, post)| post).collect()
    }
}
