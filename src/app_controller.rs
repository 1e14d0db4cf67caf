use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::Path;
use std::time::Instant;

use crate::app_config::Config;
use crate::blog::BlogPost;
use crate::file_utils::FileManager;
use crate::language_utils::Language;
use crate::translation::{
    BatchTranslator, TranslateRequest, TranslationOrigin, TranslationService,
    handle_translate_request,
};

// @module: Application controller for the command-line front end

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Shared translation service
    service: TranslationService,
}

impl Controller {
    // @method: Create a new controller backed by the configured provider
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        let service = TranslationService::from_config(&config.translation)?;
        Ok(Self { config, service })
    }

    // @method: Create a controller around an existing service
    pub fn with_service(config: Config, service: TranslationService) -> Self {
        Self { config, service }
    }

    /// The translation service
    pub fn service(&self) -> &TranslationService {
        &self.service
    }

    /// Target language of a command, falling back to the configured default
    pub fn target_language(&self, requested: Option<Language>) -> Language {
        requested.unwrap_or(self.config.default_target_language)
    }

    /// Translate one text and return the result
    pub async fn run_text(
        &self,
        text: &str,
        target_language: Option<Language>,
        source_language: Option<Language>,
    ) -> String {
        let target_language = self.target_language(target_language);
        match self.service.translate(text, target_language, source_language).await {
            Ok(translation) => {
                if translation.origin == TranslationOrigin::Cache {
                    info!("Served from cache");
                }
                translation.text
            }
            Err(fallback) => {
                warn!("Returning original text: {}", fallback);
                fallback.into_original()
            }
        }
    }

    /// Translate one blog post read from a JSON file
    pub async fn run_post(
        &self,
        input: &Path,
        output: Option<&Path>,
        target_language: Option<Language>,
    ) -> Result<BlogPost> {
        let target_language = self.target_language(target_language);
        let post: BlogPost = FileManager::read_json(input)?;

        let start_time = Instant::now();
        let translated = self.service.translate_blog_post(&post, target_language).await;
        info!("Post translated to {} in {:?}", target_language.name(), start_time.elapsed());

        FileManager::write_json(&translated, output)?;
        Ok(translated)
    }

    /// Translate a JSON array of blog posts with a progress bar
    pub async fn run_posts(
        &self,
        input: &Path,
        output: Option<&Path>,
        target_language: Option<Language>,
        concurrency: Option<usize>,
    ) -> Result<Vec<BlogPost>> {
        let target_language = self.target_language(target_language);
        let posts: Vec<BlogPost> = FileManager::read_json(input)?;
        if posts.is_empty() {
            warn!("No posts found in {:?}", input);
            FileManager::write_json(&posts, output)?;
            return Ok(posts);
        }

        let concurrency = concurrency.unwrap_or(self.config.translation.post_concurrency);
        if concurrency == 0 {
            return Err(anyhow!("Concurrency must be greater than zero"));
        }

        let progress_bar = ProgressBar::new(posts.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} posts")
                .context("Invalid progress bar template")?
                .progress_chars("#>-"),
        );

        let batch = BatchTranslator::new(self.service.clone(), concurrency);
        let bar = progress_bar.clone();
        let translated = batch
            .translate_posts(&posts, target_language, move |done, _total| {
                bar.set_position(done as u64);
            })
            .await;
        progress_bar.finish_and_clear();

        let (hits, misses, hit_rate) = self.service.cache().stats();
        info!(
            "Cache: {} hit(s), {} miss(es), hit rate {:.0}%",
            hits,
            misses,
            hit_rate * 100.0
        );

        FileManager::write_json(&translated, output)?;
        Ok(translated)
    }

    /// Answer one translate-endpoint request read from a file or stdin
    pub async fn run_request(&self, input: &Path, output: Option<&Path>) -> Result<()> {
        let request: TranslateRequest = FileManager::read_json(input)?;
        let response = handle_translate_request(&self.service, request).await;
        FileManager::write_json(&response, output)
    }

    /// Probe the translation provider
    pub async fn check_connection(&self) -> Result<()> {
        self.service
            .test_connection()
            .await
            .with_context(|| format!("{} is not reachable", self.service.provider().name()))?;
        info!("{} is reachable", self.service.provider().name());
        Ok(())
    }
}
