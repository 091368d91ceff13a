//! News source API response types.
//!
//! The source returns loosely-shaped JSON: any article field may be null or
//! absent. Every field here is optional with `#[serde(default)]` so a
//! degenerate item never fails the whole page; validation and defaulting
//! happen at the ingestion boundary, not here.

use serde::Deserialize;

/// Envelope for the `everything` search endpoint.
#[derive(Debug, Deserialize)]
pub struct EverythingResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "totalResults")]
    pub total_results: Option<i64>,
    #[serde(default)]
    pub articles: Vec<RawArticle>,
}

/// The source outlet an article was published by.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// One candidate article exactly as the source returns it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArticle {
    #[serde(default)]
    pub source: Option<RawSource>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "publishedAt")]
    pub published_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}
