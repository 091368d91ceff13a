//! Shared domain types and configuration for newsvane.
//!
//! Holds the vocabulary the other crates agree on: the ingestion country
//! context, entity classification kinds, relative time ranges, and the
//! env-driven application configuration.

pub mod app_config;
pub mod config;
pub mod range;

pub use app_config::{AppConfig, Environment, SentimentBackendKind};
pub use config::{load_app_config, load_app_config_from_env};
pub use range::Range;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Country context for ingestion and aggregation.
///
/// Selects which national query terms are appended to the article-source
/// search and which stored articles an aggregation query matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Country {
    #[default]
    #[serde(rename = "SE")]
    Se,
    #[serde(rename = "PT")]
    Pt,
}

impl Country {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Country::Se => "SE",
            Country::Pt => "PT",
        }
    }

    /// Query clause anchoring an article-source search to this country.
    #[must_use]
    pub fn query_fragment(self) -> &'static str {
        match self {
            Country::Se => {
                "(Sweden OR Swedish OR Stockholm OR Gothenburg OR G\u{f6}teborg OR Malm\u{f6} OR Malmo)"
            }
            Country::Pt => "(Portugal OR Portuguese OR Lisbon OR Lisboa OR Porto)",
        }
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Country {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SE" => Ok(Country::Se),
            "PT" => Ok(Country::Pt),
            other => Err(CoreError::InvalidCountry(other.to_string())),
        }
    }
}

/// Coarse classification of an extracted named entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Person,
    Organization,
    Place,
    Other,
}

impl EntityKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Person => "Person",
            EntityKind::Organization => "Organization",
            EntityKind::Place => "Place",
            EntityKind::Other => "Other",
        }
    }

    /// Parse a stored type string. Unknown values map to [`EntityKind::Other`]
    /// so stale rows never break a read path.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "Person" => EntityKind::Person,
            "Organization" => EntityKind::Organization,
            "Place" => EntityKind::Place,
            _ => EntityKind::Other,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid country: {0}")]
    InvalidCountry(String),
}
