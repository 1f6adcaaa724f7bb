//! Directory listing: search-URL construction and listing-card parsing.

use std::time::Duration;

use scraper::{Html, Selector};
use tracing::{info, warn};
use url::Url;

use crate::traits::fetcher::Fetcher;
use crate::types::company::CompanyRecord;

/// Build the search URL for one result page.
///
/// The directory's search endpoint takes a handful of fixed (empty)
/// geo parameters plus the query; page 1 omits the `page` parameter
/// entirely, later pages carry it. Queries are form-encoded, so spaces
/// become `+`.
pub fn search_url(base: &Url, query: &str, page: u32) -> Url {
    let mut url = base.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        pairs.append_pair("bbox", "");
        pairs.append_pair("d", "20");
        pairs.append_pair("l", "");
        pairs.append_pair("lat", "");
        pairs.append_pair("lon", "");
        pairs.append_pair("q", query);
        if page > 1 {
            pairs.append_pair("page", &page.to_string());
        }
    }
    url
}

/// Parse one listing page into partial records.
///
/// One record per listing card. The name comes from the anchor's `title`
/// attribute, the detail URL from its `href`, the address from the card's
/// `<address>` element; any missing piece yields an empty string rather
/// than failing the record.
pub fn parse_listing(html: &str) -> Vec<CompanyRecord> {
    let document = Html::parse_document(html);
    let card_selector = Selector::parse("div.cc-content").unwrap();
    let anchor_selector = Selector::parse("a").unwrap();
    let address_selector = Selector::parse("address").unwrap();

    let mut records = Vec::new();
    for card in document.select(&card_selector) {
        let anchor = card.select(&anchor_selector).next();

        let name = anchor
            .and_then(|a| a.value().attr("title"))
            .unwrap_or_default()
            .to_string();
        let url = anchor
            .and_then(|a| a.value().attr("href"))
            .unwrap_or_default()
            .to_string();
        let address = card
            .select(&address_selector)
            .next()
            .map(stripped_text)
            .unwrap_or_default();

        records.push(CompanyRecord::new(name, url).with_address(address));
    }

    records
}

/// Concatenate an element's text fragments with surrounding whitespace
/// trimmed from each.
fn stripped_text(element: scraper::ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("")
}

/// Fetch up to `page_limit` search pages and collect their records.
///
/// A page that fails to fetch or answers non-200 is logged and skipped;
/// the sweep continues. Sleeps `delay` after every page regardless of
/// outcome, as self-imposed rate limiting against the directory site.
pub async fn list_companies<F: Fetcher>(
    fetcher: &F,
    base: &Url,
    query: &str,
    page_limit: u32,
    delay: Duration,
) -> Vec<CompanyRecord> {
    let mut all = Vec::new();

    for page in 1..=page_limit {
        let url = search_url(base, query, page);
        info!(url = %url, page, "scraping directory listing");

        match fetcher.get(url.as_str()).await {
            Ok(response) if response.status == 200 => {
                let records = parse_listing(&response.body);
                info!(count = records.len(), page, "found companies on page");
                all.extend(records);
            }
            Ok(response) => {
                warn!(status = response.status, page, "failed to access listing page");
            }
            Err(e) => {
                warn!(error = %e, page, "failed to fetch listing page");
            }
        }

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    all
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://directory.example/listing/places/").unwrap()
    }

    #[test]
    fn test_first_page_omits_page_parameter() {
        let url = search_url(&base(), "banking", 1);
        assert!(!url.query().unwrap().contains("page="));
        assert!(url.query().unwrap().contains("q=banking"));
    }

    #[test]
    fn test_later_pages_carry_page_parameter() {
        let url = search_url(&base(), "banking", 3);
        assert!(url.query().unwrap().contains("page=3"));
    }

    #[test]
    fn test_query_spaces_encode_as_plus() {
        let url = search_url(&base(), "IT Software", 1);
        assert!(url.query().unwrap().contains("q=IT+Software"));
    }

    #[test]
    fn test_parse_listing_full_card() {
        let html = r#"
            <div class="cc-content">
                <a href="https://directory.example/acme" title="Acme Corp">Acme</a>
                <address> Jl. Sudirman 1, Jakarta </address>
            </div>
        "#;

        let records = parse_listing(html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Acme Corp");
        assert_eq!(records[0].url, "https://directory.example/acme");
        assert_eq!(records[0].address.as_deref(), Some("Jl. Sudirman 1, Jakarta"));
    }

    #[test]
    fn test_parse_listing_missing_pieces_become_empty_strings() {
        // Second card has a title but no href and no address element.
        let html = r#"
            <div class="cc-content">
                <a href="https://directory.example/acme" title="Acme Corp"></a>
                <address>Jl. Sudirman 1</address>
            </div>
            <div class="cc-content">
                <a title="Beta Ltd"></a>
            </div>
        "#;

        let records = parse_listing(html);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "Beta Ltd");
        assert_eq!(records[1].url, "");
        assert_eq!(records[1].address.as_deref(), Some(""));
    }

    #[test]
    fn test_parse_listing_card_without_anchor() {
        let html = r#"<div class="cc-content"><address>Somewhere</address></div>"#;

        let records = parse_listing(html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "");
        assert_eq!(records[0].url, "");
        assert_eq!(records[0].address.as_deref(), Some("Somewhere"));
    }

    #[test]
    fn test_parse_listing_ignores_other_markup() {
        let html = r#"<div class="other"><a title="Not a card"></a></div>"#;
        assert!(parse_listing(html).is_empty());
    }
}
