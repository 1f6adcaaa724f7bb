//! Content enrichment: attach extracted website text as `description`.

use std::time::Duration;

use tracing::{info, warn};

use crate::traits::extractor::ContentExtractor;
use crate::types::company::CompanyRecord;

/// Run every record's website through the content-extraction service.
///
/// Records without a non-empty website get `description = ""` and are
/// skipped without a remote call or a sleep. For the rest, one extraction
/// call sets `description` to the returned text, or to `""` on any
/// failure. Sleeps `delay` after every attempted call, success or not.
pub async fn enrich_content<X: ContentExtractor>(
    extractor: &X,
    records: Vec<CompanyRecord>,
    delay: Duration,
) -> Vec<CompanyRecord> {
    let total = records.len();
    let mut out = Vec::with_capacity(total);

    for (i, mut record) in records.into_iter().enumerate() {
        let website = record.website.clone().unwrap_or_default();

        if website.is_empty() {
            record.description = Some(String::new());
            out.push(record);
            continue;
        }

        info!(name = %record.name, "extracting website content ({}/{})", i + 1, total);

        match extractor.extract_text(&website).await {
            Ok(text) => {
                info!(chars = text.len(), "successfully extracted content");
                record.description = Some(text);
            }
            Err(e) => {
                warn!(name = %record.name, error = %e, "failed to extract content");
                record.description = Some(String::new());
            }
        }

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        out.push(record);
    }

    out
}
