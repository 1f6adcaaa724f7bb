//! Production implementations of the capability traits.

pub mod gemini;
pub mod http;
pub mod neuscraper;

pub use gemini::{GeminiChat, GeminiSession};
pub use http::HttpFetcher;
pub use neuscraper::{NeuScraperClient, DEFAULT_EXTRACTOR_ENDPOINT};
