//! The company record accumulated across pipeline stages.

use serde::{Deserialize, Serialize};

/// A single company as collected from the directory.
///
/// The record starts with the fields the listing page provides (`name`,
/// `url`, `address`) and grows as it moves through the pipeline: the detail
/// enricher fills the address/contact fields, the content enricher fills
/// `description`. Fields a record has not accumulated yet are `None` and
/// are omitted from the persisted JSON, so the field set only ever grows.
///
/// A field that was looked for but missing on the page is recorded as
/// `Some("")` — present but empty — which is distinct from never having
/// been through that stage at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// Display name from the listing page; empty if the card had no title.
    #[serde(default)]
    pub name: String,

    /// Detail-page URL; empty records are skipped by the detail enricher.
    #[serde(default)]
    pub url: String,

    /// Coarse address text from the listing card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Street address from the detail page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,

    /// Postal code from the detail page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    /// Country from the detail page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Phone number from the detail page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Company website, when the detail page links one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// Plain-text content extracted from the website; `Some("")` when
    /// there was no website or extraction failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CompanyRecord {
    /// Create a record with the listing-page fields.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the coarse listing address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Set the website.
    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether the record carries a non-empty website.
    pub fn has_website(&self) -> bool {
        self.website.as_deref().is_some_and(|w| !w.is_empty())
    }

    /// Whether the record carries a non-empty description.
    pub fn has_description(&self) -> bool {
        self.description.as_deref().is_some_and(|d| !d.is_empty())
    }

    /// Field names and values in declaration order.
    ///
    /// `None` marks fields the record has not accumulated yet; the CSV
    /// export uses this to build its column union without depending on
    /// serializer key ordering.
    pub fn fields(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("name", Some(self.name.as_str())),
            ("url", Some(self.url.as_str())),
            ("address", self.address.as_deref()),
            ("street_address", self.street_address.as_deref()),
            ("postal_code", self.postal_code.as_deref()),
            ("country", self.country.as_deref()),
            ("phone", self.phone.as_deref()),
            ("website", self.website.as_deref()),
            ("description", self.description.as_deref()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder() {
        let record = CompanyRecord::new("Acme", "https://dir.example/acme")
            .with_address("Jl. Sudirman 1")
            .with_website("https://acme.example");

        assert_eq!(record.name, "Acme");
        assert_eq!(record.url, "https://dir.example/acme");
        assert_eq!(record.address.as_deref(), Some("Jl. Sudirman 1"));
        assert!(record.has_website());
        assert!(!record.has_description());
    }

    #[test]
    fn test_empty_website_is_not_a_website() {
        let record = CompanyRecord::new("Acme", "").with_website("");
        assert!(!record.has_website());
    }

    #[test]
    fn test_unset_fields_are_omitted_from_json() {
        let record = CompanyRecord::new("Acme", "https://dir.example/acme");
        let json = serde_json::to_value(&record).unwrap();
        let obj = json.as_object().unwrap();

        assert!(obj.contains_key("name"));
        assert!(obj.contains_key("url"));
        assert!(!obj.contains_key("website"));
        assert!(!obj.contains_key("description"));
    }

    #[test]
    fn test_empty_string_field_survives_roundtrip() {
        let record = CompanyRecord::new("Acme", "x").with_description("");
        let json = serde_json::to_string(&record).unwrap();
        let back: CompanyRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(back.description.as_deref(), Some(""));
        assert_eq!(back, record);
    }
}
