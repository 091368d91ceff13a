//! HTTP client for the news source's `everything` search endpoint.

use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, Url};

use crate::error::NewsApiError;
use crate::types::{EverythingResponse, RawArticle};

const DEFAULT_BASE_URL: &str = "https://newsapi.org/";

/// Search parameters for one ingestion invocation.
///
/// The page number is passed separately per request so one params value can
/// drive the whole page loop.
#[derive(Debug, Clone)]
pub struct EverythingParams {
    /// Full query expression, e.g. `(climate) AND (Sweden OR ...)`.
    pub query: String,
    pub language: String,
    pub page_size: u32,
    /// Inclusive lower bound of the publication window.
    pub from: DateTime<Utc>,
    /// Inclusive upper bound of the publication window.
    pub to: DateTime<Utc>,
    pub sort_by: String,
    /// Optional comma-separated domain allowlist.
    pub domains: Option<String>,
}

/// Client for the news source REST API.
///
/// Manages the HTTP client, API key, and endpoint URL. Use
/// [`NewsApiClient::new`] for production or [`NewsApiClient::with_base_url`]
/// to point at a mock server in tests.
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    endpoint: Url,
}

impl NewsApiClient {
    /// Creates a new client pointed at the production news source API.
    ///
    /// # Errors
    ///
    /// Returns [`NewsApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, NewsApiError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`NewsApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`NewsApiError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, NewsApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("newsvane/0.1 (news-sentiment)")
            .build()?;

        let endpoint = format!("{}/v2/everything", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&endpoint)
            .map_err(|e| NewsApiError::InvalidBaseUrl(format!("{base_url}: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
        })
    }

    /// Fetches one page of the `everything` search.
    ///
    /// Returns the page's articles; an exhausted search returns an empty
    /// vector, which callers treat as the stop condition, not an error.
    ///
    /// # Errors
    ///
    /// - [`NewsApiError::Status`] if the source returns a non-success
    ///   status; carries the status code and the response body verbatim.
    /// - [`NewsApiError::Http`] on network failure.
    /// - [`NewsApiError::Deserialize`] if the response body is not the
    ///   expected shape.
    pub async fn everything(
        &self,
        params: &EverythingParams,
        page: u32,
    ) -> Result<Vec<RawArticle>, NewsApiError> {
        let url = self.build_url(params, page);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(NewsApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: EverythingResponse =
            serde_json::from_str(&body).map_err(|e| NewsApiError::Deserialize {
                context: format!("everything(page={page})"),
                source: e,
            })?;

        Ok(envelope.articles)
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters via [`Url::query_pairs_mut`].
    fn build_url(&self, params: &EverythingParams, page: u32) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", &params.query);
            pairs.append_pair("sortBy", &params.sort_by);
            pairs.append_pair("language", &params.language);
            pairs.append_pair("pageSize", &params.page_size.to_string());
            pairs.append_pair(
                "from",
                &params.from.to_rfc3339_opts(SecondsFormat::Secs, true),
            );
            pairs.append_pair("to", &params.to.to_rfc3339_opts(SecondsFormat::Secs, true));
            pairs.append_pair("page", &page.to_string());
            if let Some(domains) = params.domains.as_deref() {
                pairs.append_pair("domains", domains);
            }
            pairs.append_pair("apiKey", &self.api_key);
        }
        url
    }
}
