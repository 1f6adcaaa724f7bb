//! Core trait abstractions.
//!
//! The two remote collaborators (the content-extraction service and the
//! chat API) and page fetching itself sit behind capability traits so the
//! pipeline stays independently testable.

pub mod chat;
pub mod extractor;
pub mod fetcher;

pub use chat::{ChatProvider, ChatSession, ChatTurn, Role};
pub use extractor::ContentExtractor;
pub use fetcher::{FetchedPage, Fetcher};
