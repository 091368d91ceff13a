//! HTTP client for the external news article source.
//!
//! Wraps `reqwest` with source-specific error handling, API key management,
//! and tolerant typed deserialization of the `everything` search endpoint.
//! Non-success responses are surfaced with their status and body so callers
//! can distinguish a broken page fetch from a malformed single article.

pub mod client;
pub mod error;
pub mod types;

pub use client::{EverythingParams, NewsApiClient};
pub use error::NewsApiError;
pub use types::{EverythingResponse, RawArticle, RawSource};
