//! Typed errors for the pipeline library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can abort a whole pipeline run.
///
/// Per-item failures (a listing page that returns 404, a detail page that
/// times out) are absorbed inside the stages and never surface here; only
/// failures that make the run as a whole meaningless do.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Page fetch failed
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Content-extraction service failed
    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),

    /// Chat provider failed
    #[error("chat error: {0}")]
    Chat(#[from] ChatError),

    /// Dataset persistence failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors that can occur while fetching a page over HTTP.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Connection timeout
    #[error("timeout fetching: {url}")]
    Timeout { url: String },
}

/// Errors from the remote content-extraction service.
///
/// The variants are deliberately fine-grained: the interactive layer shows
/// a different message for a timeout, a refused connection, and everything
/// else.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Request to the extraction service timed out
    #[error("extraction request timed out: {url}")]
    Timeout { url: String },

    /// Could not reach the extraction service
    #[error("connection to extraction service failed: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Extraction service answered with a non-success status
    #[error("extraction service returned HTTP {status}")]
    Status { status: u16 },

    /// Response body did not have the expected shape
    #[error("malformed extraction response: {0}")]
    Malformed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Anything else
    #[error("extraction failed: {0}")]
    Other(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors from the chat provider.
#[derive(Debug, Error)]
pub enum ChatError {
    /// API key missing from the environment
    #[error("chat API key not configured: {var}")]
    MissingApiKey { var: String },

    /// Request to the chat API failed
    #[error("chat API error: {0}")]
    Api(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Chat API answered with a non-success status
    #[error("chat API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response carried no candidates or no text
    #[error("empty response from chat API")]
    EmptyResponse,
}

/// Errors while persisting or enumerating datasets.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV export failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encode/decode failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for content-extraction operations.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Result type alias for chat operations.
pub type ChatResult<T> = std::result::Result<T, ChatError>;

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
