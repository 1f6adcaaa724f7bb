//! Mock implementations of the capability traits.
//!
//! These let applications (and this crate's own tests) exercise the
//! pipeline without touching the network: canned pages for the fetcher,
//! scripted outcomes for the extractor, scripted replies for chat.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{ChatResult, ExtractError, ExtractResult, FetchError, FetchResult};
use crate::traits::chat::{ChatProvider, ChatSession};
use crate::traits::extractor::ContentExtractor;
use crate::traits::fetcher::{FetchedPage, Fetcher};

/// Mock fetcher returning canned pages by URL.
///
/// URLs with no canned page answer 404; URLs registered as failures
/// return a transport error. All requested URLs are recorded for
/// assertions.
#[derive(Default)]
pub struct MockFetcher {
    pages: Arc<RwLock<HashMap<String, FetchedPage>>>,
    failures: Arc<RwLock<Vec<String>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a 200 page.
    pub fn with_page(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages
            .write()
            .unwrap()
            .insert(url.into(), FetchedPage::ok(body));
        self
    }

    /// Register a page with an explicit status.
    pub fn with_status(
        self,
        url: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        self.pages
            .write()
            .unwrap()
            .insert(url.into(), FetchedPage::new(status, body));
        self
    }

    /// Register a URL whose fetch fails at the transport level.
    pub fn with_failure(self, url: impl Into<String>) -> Self {
        self.failures.write().unwrap().push(url.into());
        self
    }

    /// URLs requested so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Number of fetches made.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn get(&self, url: &str) -> FetchResult<FetchedPage> {
        self.calls.write().unwrap().push(url.to_string());

        if self.failures.read().unwrap().iter().any(|u| u == url) {
            return Err(FetchError::Http("simulated transport failure".into()));
        }

        Ok(self
            .pages
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_else(|| FetchedPage::new(404, "")))
    }
}

/// Scripted outcome for one extractor URL.
enum MockOutcome {
    Text(String),
    Status(u16),
    Timeout,
    Connection,
}

/// Mock content extractor with scripted per-URL outcomes.
///
/// URLs with no script answer a 404 failure. Calls are counted so tests
/// can assert that skipped records made no remote call.
#[derive(Default)]
pub struct MockExtractor {
    outcomes: Arc<RwLock<HashMap<String, MockOutcome>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockExtractor {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful extraction.
    pub fn with_text(self, url: impl Into<String>, text: impl Into<String>) -> Self {
        self.outcomes
            .write()
            .unwrap()
            .insert(url.into(), MockOutcome::Text(text.into()));
        self
    }

    /// Script a non-success HTTP status.
    pub fn with_status_failure(self, url: impl Into<String>, status: u16) -> Self {
        self.outcomes
            .write()
            .unwrap()
            .insert(url.into(), MockOutcome::Status(status));
        self
    }

    /// Script a request timeout.
    pub fn with_timeout(self, url: impl Into<String>) -> Self {
        self.outcomes
            .write()
            .unwrap()
            .insert(url.into(), MockOutcome::Timeout);
        self
    }

    /// Script a connection failure.
    pub fn with_connection_failure(self, url: impl Into<String>) -> Self {
        self.outcomes
            .write()
            .unwrap()
            .insert(url.into(), MockOutcome::Connection);
        self
    }

    /// URLs extracted so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Number of extraction calls made.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl ContentExtractor for MockExtractor {
    async fn extract_text(&self, url: &str) -> ExtractResult<String> {
        self.calls.write().unwrap().push(url.to_string());

        match self.outcomes.read().unwrap().get(url) {
            Some(MockOutcome::Text(text)) => Ok(text.clone()),
            Some(MockOutcome::Status(status)) => Err(ExtractError::Status { status: *status }),
            Some(MockOutcome::Timeout) => Err(ExtractError::Timeout {
                url: url.to_string(),
            }),
            Some(MockOutcome::Connection) => {
                Err(ExtractError::Connection("simulated connection failure".into()))
            }
            None => Err(ExtractError::Status { status: 404 }),
        }
    }
}

/// Mock chat provider with scripted replies.
///
/// Every session pops replies off the shared script in order and echoes
/// the input once the script runs dry. System prompts are recorded.
#[derive(Default)]
pub struct MockChat {
    replies: Arc<RwLock<Vec<String>>>,
    prompts: Arc<RwLock<Vec<String>>>,
}

impl MockChat {
    /// Create a mock with no scripted replies (sessions echo).
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a scripted reply.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.replies.write().unwrap().push(reply.into());
        self
    }

    /// System prompts of the sessions opened so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.read().unwrap().clone()
    }
}

impl ChatProvider for MockChat {
    fn session(&self, system_prompt: &str) -> Box<dyn ChatSession> {
        self.prompts.write().unwrap().push(system_prompt.to_string());
        Box::new(MockChatSession {
            replies: Arc::clone(&self.replies),
        })
    }
}

struct MockChatSession {
    replies: Arc<RwLock<Vec<String>>>,
}

#[async_trait]
impl ChatSession for MockChatSession {
    async fn send(&mut self, text: &str) -> ChatResult<String> {
        let mut replies = self.replies.write().unwrap();
        if replies.is_empty() {
            Ok(format!("echo: {text}"))
        } else {
            Ok(replies.remove(0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_fetcher_defaults_to_404() {
        let fetcher = MockFetcher::new();
        let page = fetcher.get("https://nowhere.example").await.unwrap();
        assert_eq!(page.status, 404);
        assert_eq!(fetcher.calls(), vec!["https://nowhere.example".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_extractor_scripts() {
        let extractor = MockExtractor::new()
            .with_text("https://a.example", "hi")
            .with_timeout("https://b.example");

        assert_eq!(extractor.extract_text("https://a.example").await.unwrap(), "hi");
        assert!(matches!(
            extractor.extract_text("https://b.example").await,
            Err(ExtractError::Timeout { .. })
        ));
        assert_eq!(extractor.call_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_chat_replies_in_order_then_echoes() {
        let chat = MockChat::new().with_reply("first").with_reply("second");
        let mut session = chat.session("sys");

        assert_eq!(session.send("a").await.unwrap(), "first");
        assert_eq!(session.send("b").await.unwrap(), "second");
        assert_eq!(session.send("c").await.unwrap(), "echo: c");
        assert_eq!(chat.prompts(), vec!["sys".to_string()]);
    }
}
