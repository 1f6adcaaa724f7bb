//! Company Intelligence Pipeline
//!
//! Scrapes a business directory for company records, enriches them from
//! each company's detail page and website, and persists the result as
//! named datasets on disk.
//!
//! # Design Philosophy
//!
//! - Sequential, rate-limited I/O: one request at a time, fixed sleeps
//!   between them, no adaptive backoff
//! - Per-item failures degrade to missing data; they never abort a run
//! - Remote collaborators (page fetching, content extraction, chat) sit
//!   behind capability traits so everything is testable with doubles
//! - Each stage is a pure transformation over the record list
//!
//! # Usage
//!
//! ```rust,ignore
//! use company_intel::{
//!     DatasetStore, HttpFetcher, NeuScraperClient, Pipeline, PipelineConfig,
//! };
//!
//! let store = DatasetStore::new("company_data")?;
//! let pipeline = Pipeline::new(
//!     HttpFetcher::new(),
//!     NeuScraperClient::new("http://0.0.0.0:1688/predict/"),
//!     store,
//!     PipelineConfig::default(),
//! );
//!
//! let dataset = pipeline.run("IT Software", 1).await?;
//! let records = pipeline.store().load(&dataset);
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Capability trait abstractions (Fetcher, ContentExtractor, Chat)
//! - [`types`] - Company record and configuration
//! - [`pipeline`] - The listing → details → content stages and orchestrator
//! - [`stores`] - Dataset persistence (CSV + JSON pairs)
//! - [`clients`] - Production implementations (reqwest, extraction service, Gemini)
//! - [`testing`] - Mock implementations for tests

pub mod clients;
pub mod error;
pub mod pipeline;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{
    ChatError, ChatResult, ExtractError, ExtractResult, FetchError, FetchResult, PipelineError,
    Result, StoreError, StoreResult,
};
pub use traits::{
    chat::{ChatProvider, ChatSession, ChatTurn, Role},
    extractor::ContentExtractor,
    fetcher::{FetchedPage, Fetcher},
};
pub use types::{
    company::CompanyRecord,
    config::{PipelineConfig, DEFAULT_DELAY, DEFAULT_DIRECTORY_URL},
};

// Re-export the pipeline
pub use pipeline::{
    analyst_prompt, company_briefing, enrich_content, enrich_details, list_companies,
    parse_detail, parse_listing, search_url, DetailFields, Pipeline,
};

// Re-export stores
pub use stores::DatasetStore;

// Re-export production clients
pub use clients::{
    GeminiChat, HttpFetcher, NeuScraperClient, DEFAULT_EXTRACTOR_ENDPOINT,
};

// Re-export testing utilities
pub use testing::{MockChat, MockExtractor, MockFetcher};
