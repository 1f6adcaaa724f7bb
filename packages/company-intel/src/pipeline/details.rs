//! Detail enrichment: per-company detail-page parsing.

use std::time::Duration;

use scraper::{Html, Selector};
use tracing::{info, warn};

use crate::traits::fetcher::Fetcher;
use crate::types::company::CompanyRecord;

/// Structured fields read from a company detail page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailFields {
    pub street_address: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
    /// Only set when at least one website container carried a non-empty
    /// link. Later containers overwrite earlier ones, so the last one
    /// found on the page wins.
    pub website: Option<String>,
}

/// Parse a detail page's company-card section.
///
/// Returns `None` when the page has no such section at all. Within the
/// section every field is read defensively: a missing element yields an
/// empty string for that field, never a parse failure.
pub fn parse_detail(html: &str) -> Option<DetailFields> {
    let document = Html::parse_document(html);
    let section_selector = Selector::parse("section#company_card").unwrap();
    let street_selector = Selector::parse(r#"span[itemprop="streetAddress"]"#).unwrap();
    let postal_selector = Selector::parse(r#"span[itemprop="postalCode"]"#).unwrap();
    let country_selector = Selector::parse(r#"span[itemprop="addressCountry"]"#).unwrap();
    let phone_selector = Selector::parse("span.phone-header").unwrap();
    let website_selector = Selector::parse("div.company-header-www").unwrap();
    let anchor_selector = Selector::parse("a").unwrap();

    let mut found = false;
    let mut fields = DetailFields::default();

    for section in document.select(&section_selector) {
        found = true;

        fields.street_address = section
            .select(&street_selector)
            .next()
            .map(stripped_text)
            .unwrap_or_default();
        fields.postal_code = section
            .select(&postal_selector)
            .next()
            .map(stripped_text)
            .unwrap_or_default();
        fields.country = section
            .select(&country_selector)
            .next()
            .map(stripped_text)
            .unwrap_or_default();
        fields.phone = section
            .select(&phone_selector)
            .next()
            .and_then(|el| el.value().attr("data-phone-number"))
            .unwrap_or_default()
            .to_string();

        for container in section.select(&website_selector) {
            let link = container
                .select(&anchor_selector)
                .next()
                .and_then(|a| a.value().attr("href"))
                .unwrap_or_default();
            if !link.is_empty() {
                fields.website = Some(link.to_string());
            }
        }
    }

    found.then_some(fields)
}

fn stripped_text(element: scraper::ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("")
}

/// Enrich each record with its detail-page fields.
///
/// Output has the same length and order as the input. Records with an
/// empty `url` pass through unchanged. A fetch failure or non-200 status
/// also passes the record through unchanged — failures are isolated
/// per record and never abort the batch. Sleeps `delay` only after
/// successfully processed records.
pub async fn enrich_details<F: Fetcher>(
    fetcher: &F,
    records: Vec<CompanyRecord>,
    delay: Duration,
) -> Vec<CompanyRecord> {
    let total = records.len();
    let mut enriched = Vec::with_capacity(total);

    for (i, mut record) in records.into_iter().enumerate() {
        if record.url.is_empty() {
            enriched.push(record);
            continue;
        }

        info!(name = %record.name, "scraping company details ({}/{})", i + 1, total);

        match fetcher.get(&record.url).await {
            Ok(response) if response.status == 200 => {
                if let Some(fields) = parse_detail(&response.body) {
                    record.street_address = Some(fields.street_address);
                    record.postal_code = Some(fields.postal_code);
                    record.country = Some(fields.country);
                    record.phone = Some(fields.phone);
                    if let Some(website) = fields.website {
                        record.website = Some(website);
                    }
                }
                enriched.push(record);

                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
            Ok(response) => {
                warn!(url = %record.url, status = response.status, "failed to access company page");
                enriched.push(record);
            }
            Err(e) => {
                warn!(name = %record.name, error = %e, "error processing company");
                enriched.push(record);
            }
        }
    }

    enriched
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PAGE: &str = r#"
        <section id="company_card">
            <span itemprop="streetAddress"> Jl. Sudirman 1 </span>
            <span itemprop="postalCode">10210</span>
            <span itemprop="addressCountry">Indonesia</span>
            <span class="phone-header" data-phone-number="+62 21 555 0100">call</span>
            <div class="company-header-www d-flex"><a href="https://a.example">site</a></div>
        </section>
    "#;

    #[test]
    fn test_parse_detail_reads_all_fields() {
        let fields = parse_detail(FULL_PAGE).unwrap();
        assert_eq!(fields.street_address, "Jl. Sudirman 1");
        assert_eq!(fields.postal_code, "10210");
        assert_eq!(fields.country, "Indonesia");
        assert_eq!(fields.phone, "+62 21 555 0100");
        assert_eq!(fields.website.as_deref(), Some("https://a.example"));
    }

    #[test]
    fn test_parse_detail_missing_elements_yield_empty_strings() {
        let html = r#"<section id="company_card"><span itemprop="postalCode">10210</span></section>"#;
        let fields = parse_detail(html).unwrap();

        assert_eq!(fields.street_address, "");
        assert_eq!(fields.postal_code, "10210");
        assert_eq!(fields.country, "");
        assert_eq!(fields.phone, "");
        assert_eq!(fields.website, None);
    }

    #[test]
    fn test_parse_detail_last_website_wins() {
        let html = r#"
            <section id="company_card">
                <div class="company-header-www d-flex"><a href="https://a.example">a</a></div>
                <div class="company-header-www d-flex"><a href="https://b.example">b</a></div>
            </section>
        "#;
        let fields = parse_detail(html).unwrap();
        assert_eq!(fields.website.as_deref(), Some("https://b.example"));
    }

    #[test]
    fn test_parse_detail_empty_link_does_not_overwrite() {
        let html = r#"
            <section id="company_card">
                <div class="company-header-www d-flex"><a href="https://a.example">a</a></div>
                <div class="company-header-www d-flex"><a>no href</a></div>
            </section>
        "#;
        let fields = parse_detail(html).unwrap();
        assert_eq!(fields.website.as_deref(), Some("https://a.example"));
    }

    #[test]
    fn test_parse_detail_without_section_is_none() {
        assert_eq!(parse_detail("<html><body>nothing here</body></html>"), None);
    }

    mod enrich {
        use super::*;
        use crate::testing::MockFetcher;

        #[tokio::test]
        async fn test_empty_url_records_pass_through_without_fetching() {
            let fetcher = MockFetcher::new();
            let records = vec![CompanyRecord::new("No URL", "")];

            let enriched = enrich_details(&fetcher, records.clone(), Duration::ZERO).await;

            assert_eq!(enriched, records);
            assert_eq!(fetcher.call_count(), 0);
        }

        #[tokio::test]
        async fn test_non_200_passes_record_through_unchanged() {
            let fetcher =
                MockFetcher::new().with_status("https://dir.example/acme", 500, "oops");
            let record = CompanyRecord::new("Acme", "https://dir.example/acme")
                .with_address("somewhere");

            let enriched =
                enrich_details(&fetcher, vec![record.clone()], Duration::ZERO).await;

            assert_eq!(enriched, vec![record]);
        }

        #[tokio::test]
        async fn test_fetch_error_passes_record_through_unchanged() {
            let fetcher = MockFetcher::new().with_failure("https://dir.example/acme");
            let record = CompanyRecord::new("Acme", "https://dir.example/acme");

            let enriched =
                enrich_details(&fetcher, vec![record.clone()], Duration::ZERO).await;

            assert_eq!(enriched, vec![record]);
        }

        #[tokio::test]
        async fn test_success_populates_detail_fields() {
            let fetcher = MockFetcher::new().with_page("https://dir.example/acme", FULL_PAGE);
            let records = vec![CompanyRecord::new("Acme", "https://dir.example/acme")];

            let enriched = enrich_details(&fetcher, records, Duration::ZERO).await;

            assert_eq!(enriched[0].street_address.as_deref(), Some("Jl. Sudirman 1"));
            assert_eq!(enriched[0].phone.as_deref(), Some("+62 21 555 0100"));
            assert_eq!(enriched[0].website.as_deref(), Some("https://a.example"));
        }

        #[tokio::test]
        async fn test_output_preserves_length_and_order() {
            let fetcher = MockFetcher::new().with_page("https://dir.example/acme", FULL_PAGE);
            let records = vec![
                CompanyRecord::new("No URL", ""),
                CompanyRecord::new("Acme", "https://dir.example/acme"),
                CompanyRecord::new("Gone", "https://dir.example/gone"),
            ];

            let enriched = enrich_details(&fetcher, records, Duration::ZERO).await;

            assert_eq!(enriched.len(), 3);
            assert_eq!(enriched[0].name, "No URL");
            assert_eq!(enriched[1].name, "Acme");
            assert_eq!(enriched[2].name, "Gone");
        }
    }
}
