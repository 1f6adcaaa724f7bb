//! ContentExtractor trait for the remote content-extraction service.
//!
//! The service is opaque to the pipeline: URL in, plain text out. Keeping
//! it behind a trait means the pipeline logic never sees client specifics
//! and tests can swap in a double.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ExtractResult;

/// Capability interface over the content-extraction service.
///
/// Implementations:
/// - `NeuScraperClient` - HTTP client for the extraction endpoint
/// - `MockExtractor` - canned responses for tests
#[async_trait]
pub trait ContentExtractor: Send + Sync {
    /// Extract plain text from the page at `url`.
    async fn extract_text(&self, url: &str) -> ExtractResult<String>;

    /// Same as [`extract_text`](Self::extract_text) but with a
    /// caller-supplied timeout.
    ///
    /// The interactive single-record path uses a longer timeout than the
    /// batch pipeline. The default implementation ignores the timeout.
    async fn extract_text_with_timeout(
        &self,
        url: &str,
        timeout: Duration,
    ) -> ExtractResult<String> {
        let _ = timeout;
        self.extract_text(url).await
    }
}
