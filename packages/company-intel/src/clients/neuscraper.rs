//! Client for the NeuScraper content-extraction service.
//!
//! The service turns a website URL into extracted plain text over a tiny
//! JSON API: POST `{"url": ...}`, read `Text` from the 200 response. Any
//! other status or shape counts as an extraction failure.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ExtractError, ExtractResult};
use crate::traits::extractor::ContentExtractor;

/// Default endpoint of a locally running extraction service.
pub const DEFAULT_EXTRACTOR_ENDPOINT: &str = "http://0.0.0.0:1688/predict/";

#[derive(Serialize)]
struct ExtractRequest<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct ExtractResponse {
    #[serde(rename = "Text")]
    text: String,
}

/// HTTP client for the extraction endpoint.
pub struct NeuScraperClient {
    client: reqwest::Client,
    endpoint: String,
}

impl NeuScraperClient {
    /// Create a client for the given endpoint (30 s default timeout).
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Get the configured endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post_extract(&self, url: &str, timeout: Option<Duration>) -> ExtractResult<String> {
        debug!(url = %url, endpoint = %self.endpoint, "requesting content extraction");

        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&ExtractRequest { url });
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Status {
                status: status.as_u16(),
            });
        }

        let body: ExtractResponse = response
            .json()
            .await
            .map_err(|e| ExtractError::Malformed(Box::new(e)))?;

        debug!(url = %url, chars = body.text.len(), "content extracted");
        Ok(body.text)
    }
}

/// Map a transport error onto the extraction taxonomy.
fn classify(url: &str, e: reqwest::Error) -> ExtractError {
    if e.is_timeout() {
        ExtractError::Timeout {
            url: url.to_string(),
        }
    } else if e.is_connect() {
        ExtractError::Connection(Box::new(e))
    } else {
        ExtractError::Other(Box::new(e))
    }
}

#[async_trait]
impl ContentExtractor for NeuScraperClient {
    async fn extract_text(&self, url: &str) -> ExtractResult<String> {
        self.post_extract(url, None).await
    }

    async fn extract_text_with_timeout(
        &self,
        url: &str,
        timeout: Duration,
    ) -> ExtractResult<String> {
        self.post_extract(url, Some(timeout)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        let request = ExtractRequest {
            url: "https://a.example",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"url": "https://a.example"}));
    }

    #[test]
    fn test_response_reads_text_field() {
        let body: ExtractResponse =
            serde_json::from_str(r#"{"Text": "Hello", "Language": "en"}"#).unwrap();
        assert_eq!(body.text, "Hello");
    }

    #[test]
    fn test_response_without_text_field_is_an_error() {
        let result: Result<ExtractResponse, _> = serde_json::from_str(r#"{"Other": 1}"#);
        assert!(result.is_err());
    }
}
