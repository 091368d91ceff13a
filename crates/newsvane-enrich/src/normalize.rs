//! Candidate normalization at the ingestion boundary.
//!
//! The external source returns loosely-shaped items; this is the only place
//! their defaulting rules live. A candidate missing a URL or a title is not
//! an error, it is silently skipped.

use chrono::{DateTime, Utc};
use newsvane_newsapi::RawArticle;

/// A candidate article with all defaulting rules applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedArticle {
    pub url: String,
    pub title: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
    pub author: Option<String>,
    pub description: Option<String>,
    /// Full content when present, falling back to the description.
    pub body: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}

/// Applies the ingestion defaulting rules to one raw candidate.
///
/// Returns `None` when the candidate has no URL or no title. Otherwise:
/// the source name defaults to `"Unknown"`, the publication time defaults
/// to `fetched_at` when absent or unparseable, and the body falls back
/// from full content to the description.
#[must_use]
pub fn normalize_candidate(raw: &RawArticle, fetched_at: DateTime<Utc>) -> Option<NormalizedArticle> {
    let url = non_blank(raw.url.as_deref())?;
    let title = non_blank(raw.title.as_deref())?;

    let source = raw
        .source
        .as_ref()
        .and_then(|s| non_blank(s.name.as_deref()))
        .unwrap_or_else(|| "Unknown".to_string());

    let published_at = raw
        .published_at
        .as_deref()
        .and_then(|s| s.parse::<DateTime<Utc>>().ok())
        .unwrap_or(fetched_at);

    let description = non_blank(raw.description.as_deref());
    let body = non_blank(raw.content.as_deref()).or_else(|| description.clone());

    Some(NormalizedArticle {
        url,
        title,
        source,
        published_at,
        author: non_blank(raw.author.as_deref()),
        description,
        body,
    })
}

/// Text the sentiment score is computed over: title and description joined
/// with an em-dash separator.
#[must_use]
pub fn sentiment_basis(article: &NormalizedArticle) -> String {
    match article.description.as_deref() {
        Some(description) => format!("{} \u{2014} {}", article.title, description),
        None => article.title.clone(),
    }
}

/// Text entity extraction runs over: title and body, space joined.
#[must_use]
pub fn entity_basis(article: &NormalizedArticle) -> String {
    match article.body.as_deref() {
        Some(body) => format!("{} {}", article.title, body),
        None => article.title.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use newsvane_newsapi::RawSource;

    fn fetched_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap()
    }

    fn raw() -> RawArticle {
        RawArticle {
            source: Some(RawSource {
                id: None,
                name: Some("Example News".to_string()),
            }),
            author: Some("A. Smith".to_string()),
            title: Some("Climate policy gains momentum".to_string()),
            description: Some("Parliament debates a new bill".to_string()),
            url: Some("https://example.com/a1".to_string()),
            published_at: Some("2026-08-03T09:00:00Z".to_string()),
            content: Some("Full body text".to_string()),
        }
    }

    #[test]
    fn complete_candidate_passes_through() {
        let normalized = normalize_candidate(&raw(), fetched_at()).unwrap();
        assert_eq!(normalized.url, "https://example.com/a1");
        assert_eq!(normalized.source, "Example News");
        assert_eq!(normalized.body.as_deref(), Some("Full body text"));
        assert_eq!(
            normalized.published_at,
            Utc.with_ymd_and_hms(2026, 8, 3, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn missing_url_is_skipped() {
        let mut candidate = raw();
        candidate.url = None;
        assert!(normalize_candidate(&candidate, fetched_at()).is_none());
    }

    #[test]
    fn blank_title_is_skipped() {
        let mut candidate = raw();
        candidate.title = Some("   ".to_string());
        assert!(normalize_candidate(&candidate, fetched_at()).is_none());
    }

    #[test]
    fn missing_source_defaults_to_unknown() {
        let mut candidate = raw();
        candidate.source = None;
        let normalized = normalize_candidate(&candidate, fetched_at()).unwrap();
        assert_eq!(normalized.source, "Unknown");
    }

    #[test]
    fn missing_published_at_defaults_to_fetch_time() {
        let mut candidate = raw();
        candidate.published_at = None;
        let normalized = normalize_candidate(&candidate, fetched_at()).unwrap();
        assert_eq!(normalized.published_at, fetched_at());
    }

    #[test]
    fn unparseable_published_at_defaults_to_fetch_time() {
        let mut candidate = raw();
        candidate.published_at = Some("yesterday-ish".to_string());
        let normalized = normalize_candidate(&candidate, fetched_at()).unwrap();
        assert_eq!(normalized.published_at, fetched_at());
    }

    #[test]
    fn body_falls_back_to_description() {
        let mut candidate = raw();
        candidate.content = None;
        let normalized = normalize_candidate(&candidate, fetched_at()).unwrap();
        assert_eq!(normalized.body.as_deref(), Some("Parliament debates a new bill"));
    }

    #[test]
    fn body_is_none_when_both_content_and_description_are_blank() {
        let mut candidate = raw();
        candidate.content = None;
        candidate.description = Some(String::new());
        let normalized = normalize_candidate(&candidate, fetched_at()).unwrap();
        assert!(normalized.body.is_none());
    }

    #[test]
    fn sentiment_basis_joins_title_and_description() {
        let normalized = normalize_candidate(&raw(), fetched_at()).unwrap();
        assert_eq!(
            sentiment_basis(&normalized),
            "Climate policy gains momentum \u{2014} Parliament debates a new bill"
        );
    }

    #[test]
    fn sentiment_basis_without_description_is_the_title() {
        let mut candidate = raw();
        candidate.description = None;
        let normalized = normalize_candidate(&candidate, fetched_at()).unwrap();
        assert_eq!(sentiment_basis(&normalized), "Climate policy gains momentum");
    }

    #[test]
    fn entity_basis_joins_title_and_body() {
        let normalized = normalize_candidate(&raw(), fetched_at()).unwrap();
        assert_eq!(
            entity_basis(&normalized),
            "Climate policy gains momentum Full body text"
        );
    }
}
