//! Fetcher trait for pluggable page retrieval.
//!
//! The pipeline never talks to `reqwest` directly; it fetches through this
//! seam so tests can feed it canned pages.

use async_trait::async_trait;

use crate::error::FetchResult;

/// A fetched page: HTTP status plus body text.
///
/// Non-success statuses are returned as pages rather than errors — the
/// stages decide what a 404 means (usually: log and skip the item).
/// Transport failures (DNS, refused connection, timeout) are `FetchError`.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// HTTP status code.
    pub status: u16,

    /// Response body as text.
    pub body: String,
}

impl FetchedPage {
    /// Create a fetched page.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Create a 200 page.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }
}

/// Fetcher trait for retrieving pages by URL.
///
/// Implementations:
/// - `HttpFetcher` - blocking-per-call reqwest GET
/// - `MockFetcher` - canned responses for tests
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Issue a single GET and return status plus body.
    async fn get(&self, url: &str) -> FetchResult<FetchedPage>;
}
