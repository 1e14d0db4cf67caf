/*!
 * Mock provider implementation for testing.
 *
 * This module provides a mock provider that simulates different behaviors:
 * - `MockProvider::working()` - Always succeeds with translated text
 * - `MockProvider::soft_failing()` - Answers with the original chunk
 * - `MockProvider::failing()` - Always fails with a transport error
 *
 * Every call is counted and recorded, and the peak number of overlapping
 * calls is tracked so tests can check the request gate.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::language_utils::Language;
use crate::providers::Provider;

/// A chunk request as seen by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct MockRequest {
    /// The text to translate
    pub text: String,
    /// Source language
    pub source_language: Language,
    /// Target language
    pub target_language: Language,
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a translation
    Working,
    /// Responds, but the body reports a failure so the chunk comes back as is
    SoftFailing,
    /// Always fails with a transport error
    Failing,
    /// Fails with a transport error on the given 1-based call only
    FailOnCall { call: usize },
    /// Succeeds after a delay
    Slow { delay_ms: u64 },
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of calls made
    call_count: Arc<AtomicUsize>,
    /// Calls currently in progress
    in_flight: Arc<AtomicUsize>,
    /// Highest number of overlapping calls seen
    peak_in_flight: Arc<AtomicUsize>,
    /// Every request received, in order
    requests: Arc<Mutex<Vec<MockRequest>>>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&MockRequest) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak_in_flight: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            custom_response: None,
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock whose responses all report an application failure
    pub fn soft_failing() -> Self {
        Self::new(MockBehavior::SoftFailing)
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that fails only on the given 1-based call
    pub fn fail_on_call(call: usize) -> Self {
        Self::new(MockBehavior::FailOnCall { call })
    }

    /// Create a mock that answers after a delay
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&MockRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of calls made so far
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Highest number of overlapping calls seen so far
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> Vec<MockRequest> {
        self.requests.lock().clone()
    }

    /// Default translation: the text tagged with the target language
    pub fn default_translation(request: &MockRequest) -> String {
        format!("[{}] {}", request.target_language, request.text)
    }

    fn translate(&self, request: &MockRequest) -> String {
        match self.custom_response {
            Some(generator) => generator(request),
            None => Self::default_translation(request),
        }
    }

    fn transport_error() -> ProviderError {
        ProviderError::ApiError {
            status_code: 503,
            message: "Service unavailable".to_string(),
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn translate_chunk(
        &self,
        text: &str,
        source_language: Language,
        target_language: Language,
    ) -> Result<String, ProviderError> {
        let call = self.call_count.fetch_add(1, Ordering::SeqCst) + 1;
        let request = MockRequest {
            text: text.to_string(),
            source_language,
            target_language,
        };
        self.requests.lock().push(request.clone());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        let result = match self.behavior {
            MockBehavior::Working => Ok(self.translate(&request)),
            MockBehavior::SoftFailing => Ok(request.text.clone()),
            MockBehavior::Failing => Err(Self::transport_error()),
            MockBehavior::FailOnCall { call: failing } if failing == call => {
                Err(Self::transport_error())
            }
            MockBehavior::FailOnCall { .. } => Ok(self.translate(&request)),
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Ok(self.translate(&request))
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(Self::transport_error()),
            _ => Ok(()),
        }
    }
}
