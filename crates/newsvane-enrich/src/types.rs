//! Ingestion invocation inputs and outputs.

use newsvane_core::Country;
use serde::Serialize;

const DEFAULT_DAYS: i64 = 3;
const DEFAULT_PAGE_SIZE: u32 = 20;

/// Parameters for one ingestion invocation, supplied by the trigger
/// (manual request, CLI, or the periodic scheduler job).
#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub term: String,
    pub days: i64,
    pub page_size: u32,
    pub country: Country,
    /// Optional comma-separated domain allowlist passed through to the source.
    pub domains: Option<String>,
}

impl IngestOptions {
    #[must_use]
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            days: DEFAULT_DAYS,
            page_size: DEFAULT_PAGE_SIZE,
            country: Country::default(),
            domains: None,
        }
    }

    /// Lookback clamped to the supported window.
    #[must_use]
    pub fn clamped_days(&self) -> i64 {
        self.days.clamp(1, 30)
    }

    /// Page size clamped to the source's supported range.
    #[must_use]
    pub fn clamped_page_size(&self) -> u32 {
        self.page_size.clamp(1, 100)
    }

    /// Domains filter with blanks treated as unset.
    #[must_use]
    pub fn trimmed_domains(&self) -> Option<String> {
        self.domains
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned)
    }
}

/// Outcome of one ingestion invocation.
///
/// `fetched` counts every candidate the source returned across all pages;
/// `analyzed` counts the candidates that made it through enrichment.
/// Skipped candidates are the difference.
#[derive(Debug, Clone, Serialize)]
pub struct IngestSummary {
    pub term: String,
    pub country: Country,
    pub fetched: usize,
    pub analyzed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_applies_defaults() {
        let opts = IngestOptions::new("climate");
        assert_eq!(opts.term, "climate");
        assert_eq!(opts.days, 3);
        assert_eq!(opts.page_size, 20);
        assert_eq!(opts.country, Country::Se);
        assert!(opts.domains.is_none());
    }

    #[test]
    fn days_are_clamped_to_supported_window() {
        let mut opts = IngestOptions::new("climate");
        opts.days = 0;
        assert_eq!(opts.clamped_days(), 1);
        opts.days = 90;
        assert_eq!(opts.clamped_days(), 30);
    }

    #[test]
    fn page_size_is_clamped_to_source_range() {
        let mut opts = IngestOptions::new("climate");
        opts.page_size = 0;
        assert_eq!(opts.clamped_page_size(), 1);
        opts.page_size = 500;
        assert_eq!(opts.clamped_page_size(), 100);
    }

    #[test]
    fn blank_domains_are_unset() {
        let mut opts = IngestOptions::new("climate");
        opts.domains = Some("  ".to_string());
        assert!(opts.trimmed_domains().is_none());
        opts.domains = Some(" example.com ".to_string());
        assert_eq!(opts.trimmed_domains().as_deref(), Some("example.com"));
    }

    #[test]
    fn summary_serializes_with_plain_keys() {
        let summary = IngestSummary {
            term: "climate".to_string(),
            country: Country::Se,
            fetched: 40,
            analyzed: 37,
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"term\":\"climate\""));
        assert!(json.contains("\"country\":\"SE\""));
        assert!(json.contains("\"fetched\":40"));
        assert!(json.contains("\"analyzed\":37"));
    }
}
