//! Article enrichment pipeline for newsvane.
//!
//! Fetches candidate articles from the external news source, deduplicates
//! them against stored state by URL, scores sentiment, extracts named
//! entities, persists normalized records, and fans out a best-effort
//! "analysis created" event to live subscribers.

pub mod entities;
pub mod error;
pub mod events;
pub mod normalize;
pub mod pipeline;
pub mod scorer;
pub mod types;

pub use entities::{extract_entities, ExtractedEntity};
pub use error::{ArticleError, EnrichError};
pub use events::{AnalysisCreatedPayload, EventBus, IngestEvent};
pub use normalize::{entity_basis, normalize_candidate, sentiment_basis, NormalizedArticle};
pub use pipeline::run_ingestion;
pub use scorer::{LexiconScorer, RemoteScorer, ScorerError, SentimentScorer};
pub use types::{IngestOptions, IngestSummary};
