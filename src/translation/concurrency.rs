/*!
 * Upstream request gate.
 *
 * The free translation API has a shared quota, so every call to it goes
 * through one semaphore. With the default width of one, no two upstream
 * requests are ever in flight at the same time, no matter how many
 * top-level translations run concurrently.
 */

use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::errors::TranslationError;

/// Default number of upstream requests allowed in flight
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 1;

/// Semaphore scoped to the upstream API, shared by clones
#[derive(Debug, Clone)]
pub struct RequestGate {
    permits: Arc<Semaphore>,
    width: usize,
}

impl RequestGate {
    /// Create a gate admitting `width` requests at once (at least one)
    pub fn new(width: usize) -> Self {
        let width = width.max(1);
        Self {
            permits: Arc::new(Semaphore::new(width)),
            width,
        }
    }

    /// A gate admitting one request at a time
    pub fn serial() -> Self {
        Self::new(1)
    }

    /// Run `request` while holding a permit
    pub async fn run<F, T>(&self, request: F) -> Result<T, TranslationError>
    where
        F: Future<Output = T>,
    {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| TranslationError::GateClosed)?;
        Ok(request.await)
    }

    /// Configured width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Permits not currently held
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }
}

impl Default for RequestGate {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONCURRENT_REQUESTS)
    }
}
