//! Configuration for the scrape-enrich-persist pipeline.

use std::time::Duration;

use url::Url;

/// Search endpoint of the business directory.
pub const DEFAULT_DIRECTORY_URL: &str = "https://www.yellowpages.id/listing/places/";

/// Default delay between requests to external services.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(5);

/// Configuration for a pipeline run.
///
/// Delays are injectable so tests can run with zero delay; production
/// defaults are deliberately slow to avoid hammering the directory site
/// and the extraction service.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Base URL of the directory's search endpoint.
    pub directory_url: Url,

    /// Delay after each listing page fetch.
    pub page_delay: Duration,

    /// Delay after each successfully enriched detail page.
    pub detail_delay: Duration,

    /// Delay after each content-extraction attempt.
    pub content_delay: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            directory_url: Url::parse(DEFAULT_DIRECTORY_URL)
                .expect("default directory URL is valid"),
            page_delay: DEFAULT_DELAY,
            detail_delay: DEFAULT_DELAY,
            content_delay: DEFAULT_DELAY,
        }
    }
}

impl PipelineConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the directory search URL.
    pub fn with_directory_url(mut self, url: Url) -> Self {
        self.directory_url = url;
        self
    }

    /// Set the listing-page delay.
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    /// Set the detail-page delay.
    pub fn with_detail_delay(mut self, delay: Duration) -> Self {
        self.detail_delay = delay;
        self
    }

    /// Set the content-extraction delay.
    pub fn with_content_delay(mut self, delay: Duration) -> Self {
        self.content_delay = delay;
        self
    }

    /// Set all three delays at once (tests use `Duration::ZERO`).
    pub fn with_delays(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self.detail_delay = delay;
        self.content_delay = delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.directory_url.as_str(), DEFAULT_DIRECTORY_URL);
        assert_eq!(config.page_delay, DEFAULT_DELAY);
    }

    #[test]
    fn test_with_delays_sets_all() {
        let config = PipelineConfig::new().with_delays(Duration::ZERO);
        assert!(config.page_delay.is_zero());
        assert!(config.detail_delay.is_zero());
        assert!(config.content_delay.is_zero());
    }
}
