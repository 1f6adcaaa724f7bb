//! The pipeline orchestrator: listing → details → content → save.

use chrono::Local;
use tracing::info;

use crate::error::Result;
use crate::pipeline::{content::enrich_content, details::enrich_details, listing::list_companies};
use crate::stores::dataset::DatasetStore;
use crate::traits::{extractor::ContentExtractor, fetcher::Fetcher};
use crate::types::config::PipelineConfig;

/// Timestamp suffix for dataset names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// The full scrape-enrich-persist pipeline.
///
/// Owns its collaborators: a [`Fetcher`] for the directory site, a
/// [`ContentExtractor`] for website text, and the [`DatasetStore`] for
/// persistence. Stages run strictly in sequence; per-item failures are
/// absorbed inside the stages, so a run only aborts (without saving) on
/// failures that make the whole result meaningless.
pub struct Pipeline<F, X> {
    fetcher: F,
    extractor: X,
    store: DatasetStore,
    config: PipelineConfig,
}

impl<F: Fetcher, X: ContentExtractor> Pipeline<F, X> {
    /// Assemble a pipeline.
    pub fn new(fetcher: F, extractor: X, store: DatasetStore, config: PipelineConfig) -> Self {
        Self {
            fetcher,
            extractor,
            store,
            config,
        }
    }

    /// The dataset store, for callers that load and re-save datasets.
    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    /// The content extractor, for single-record re-enrichment.
    pub fn extractor(&self) -> &X {
        &self.extractor
    }

    /// The active configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full pipeline for a query and return the saved dataset name.
    pub async fn run(&self, query: &str, page_limit: u32) -> Result<String> {
        info!(query = %query, page_limit, "starting pipeline");

        let records = list_companies(
            &self.fetcher,
            &self.config.directory_url,
            query,
            page_limit,
            self.config.page_delay,
        )
        .await;
        info!(count = records.len(), "collected companies from directory");

        let records = enrich_details(&self.fetcher, records, self.config.detail_delay).await;
        info!(count = records.len(), "collected company details");

        let records = enrich_content(&self.extractor, records, self.config.content_delay).await;
        info!(count = records.len(), "enriched companies with website content");

        let name = dataset_name(query);
        self.store.save(&records, Some(&name))?;
        info!(dataset = %name, "pipeline completed");

        Ok(name)
    }
}

/// Derive a dataset name from the query: lower-cased, spaces to
/// underscores, plus a timestamp.
fn dataset_name(query: &str) -> String {
    format!(
        "{}_{}",
        query.to_lowercase().replace(' ', "_"),
        Local::now().format(TIMESTAMP_FORMAT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_name_slug() {
        let name = dataset_name("IT Software");
        assert!(name.starts_with("it_software_"));
        // slug + '_' + YYYYMMDD_HHMMSS
        assert_eq!(name.len(), "it_software_".len() + 15);
    }
}
