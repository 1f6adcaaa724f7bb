//! The scrape-enrich pipeline and its stages.
//!
//! Each stage is a pure transformation over the record list, generic over
//! the capability trait it needs, with per-item failures absorbed inside
//! the stage. [`Pipeline`] chains them and persists the result.

pub mod content;
pub mod details;
pub mod listing;
pub mod prompts;
pub mod run;

pub use content::enrich_content;
pub use details::{enrich_details, parse_detail, DetailFields};
pub use listing::{list_companies, parse_listing, search_url};
pub use prompts::{analyst_prompt, company_briefing};
pub use run::{Pipeline, TIMESTAMP_FORMAT};
