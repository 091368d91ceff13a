//! Database operations for the `analyses` table.
//!
//! Analyses are append-only: one row is created per successfully enriched
//! article per ingestion pass, and rows are never updated or deduplicated
//! against earlier passes for the same article and term.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;

use crate::DbError;

/// A row from the `analyses` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AnalysisRow {
    pub id: i64,
    pub article_id: i64,
    pub sentiment: f64,
    pub topics: Vec<String>,
    pub entities: Value,
    pub created_at: DateTime<Utc>,
}

/// Inserts a new analysis and returns its generated id.
///
/// Callers are responsible for the persistence invariants: `sentiment`
/// clamped to [0, 1] and `topics` lowercase and trimmed. `entities` is an
/// auxiliary JSONB payload and must be a JSON object.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_analysis(
    pool: &PgPool,
    article_id: i64,
    sentiment: f64,
    topics: &[String],
    entities: Value,
) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar::<_, i64>(
        "INSERT INTO analyses (article_id, sentiment, topics, entities) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id",
    )
    .bind(article_id)
    .bind(sentiment)
    .bind(topics)
    .bind(entities)
    .fetch_one(pool)
    .await?;

    Ok(id)
}
