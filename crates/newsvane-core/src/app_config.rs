use std::net::SocketAddr;

use crate::Country;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which sentiment backend the process scores with.
///
/// Exactly one backend is active per process; selection happens here at
/// configuration time, never inside the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SentimentBackendKind {
    #[default]
    Lexicon,
    Remote,
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub newsapi_key: Option<String>,
    pub newsapi_base_url: Option<String>,
    pub newsapi_timeout_secs: u64,
    pub hf_api_key: Option<String>,
    pub sentiment_backend: SentimentBackendKind,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub ingest_terms: Vec<String>,
    pub ingest_country: Country,
    pub ingest_days: i64,
    pub ingest_page_size: u32,
    pub ingest_domains: Option<String>,
    pub ingest_max_pages: u32,
    pub ingest_sleep_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("newsapi_key", &self.newsapi_key.as_ref().map(|_| "[redacted]"))
            .field("newsapi_base_url", &self.newsapi_base_url)
            .field("newsapi_timeout_secs", &self.newsapi_timeout_secs)
            .field("hf_api_key", &self.hf_api_key.as_ref().map(|_| "[redacted]"))
            .field("sentiment_backend", &self.sentiment_backend)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("ingest_terms", &self.ingest_terms)
            .field("ingest_country", &self.ingest_country)
            .field("ingest_days", &self.ingest_days)
            .field("ingest_page_size", &self.ingest_page_size)
            .field("ingest_domains", &self.ingest_domains)
            .field("ingest_max_pages", &self.ingest_max_pages)
            .field("ingest_sleep_ms", &self.ingest_sleep_ms)
            .finish()
    }
}
