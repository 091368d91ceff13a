//! Read-model queries for the dashboard insight endpoints.
//!
//! The sentiment series is computed in two steps: a flat sample query
//! (analysis sentiment joined to the owning article's publication time and
//! source) followed by pure in-memory bucketing into UTC calendar days.
//! Keeping the bucketing out of SQL keeps it unit-testable without a live
//! database.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use newsvane_core::Country;
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row and point types
// ---------------------------------------------------------------------------

/// One analysis sample joined with its article's publication context.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SentimentSampleRow {
    pub sentiment: f64,
    pub published_at: DateTime<Utc>,
    pub source: String,
}

/// Mention count for one source within a daily bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCount {
    pub source: String,
    pub count: i64,
}

/// One calendar-day bucket of a sentiment series.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub avg_sentiment: f64,
    pub sources: Vec<SourceCount>,
}

/// Entity ranking row: total occurrence count across matching analyses.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EntityRankRow {
    pub id: i64,
    pub name: String,
    pub kind: String,
    pub mentions: i64,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Fetches sentiment samples for one term, filtered by country and a lower
/// publication-time bound, ordered ascending by publication time.
///
/// The term matches analyses whose `topics` array contains it exactly;
/// callers lowercase and trim the term before querying.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_sentiment_samples(
    pool: &PgPool,
    term: &str,
    country: Country,
    since: DateTime<Utc>,
) -> Result<Vec<SentimentSampleRow>, DbError> {
    let rows = sqlx::query_as::<_, SentimentSampleRow>(
        "SELECT a.sentiment, ar.published_at, ar.source \
         FROM analyses a \
         JOIN articles ar ON ar.id = a.article_id \
         WHERE a.topics @> ARRAY[$1]::TEXT[] \
           AND ar.country = $2 \
           AND ar.published_at >= $3 \
         ORDER BY ar.published_at ASC",
    )
    .bind(term)
    .bind(country.as_str())
    .bind(since)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Groups samples into UTC calendar-day buckets.
///
/// Each bucket carries the mean sentiment of its samples and a per-source
/// mention count. Buckets are emitted ascending by date; an empty input
/// produces an empty output, never an error.
#[must_use]
pub fn bucket_daily(samples: &[SentimentSampleRow]) -> Vec<DailyPoint> {
    struct Bucket {
        sum: f64,
        count: i64,
        sources: BTreeMap<String, i64>,
    }

    let mut by_date: BTreeMap<NaiveDate, Bucket> = BTreeMap::new();

    for sample in samples {
        let day = sample.published_at.date_naive();
        let bucket = by_date.entry(day).or_insert_with(|| Bucket {
            sum: 0.0,
            count: 0,
            sources: BTreeMap::new(),
        });
        bucket.sum += sample.sentiment;
        bucket.count += 1;
        *bucket.sources.entry(sample.source.clone()).or_insert(0) += 1;
    }

    by_date
        .into_iter()
        .map(|(date, bucket)| {
            #[allow(clippy::cast_precision_loss)]
            let avg_sentiment = if bucket.count == 0 {
                0.0
            } else {
                bucket.sum / bucket.count as f64
            };
            DailyPoint {
                date,
                avg_sentiment,
                sources: bucket
                    .sources
                    .into_iter()
                    .map(|(source, count)| SourceCount { source, count })
                    .collect(),
            }
        })
        .collect()
}

/// Fetches and buckets a single-term daily sentiment series.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the sample query fails.
pub async fn sentiment_series(
    pool: &PgPool,
    term: &str,
    country: Country,
    since: DateTime<Utc>,
) -> Result<Vec<DailyPoint>, DbError> {
    let samples = list_sentiment_samples(pool, term, country, since).await?;
    Ok(bucket_daily(&samples))
}

/// Clamps a requested entity-ranking size to [1, 500], defaulting to 100.
#[must_use]
pub fn clamp_take(take: Option<i64>) -> i64 {
    take.unwrap_or(100).clamp(1, 500)
}

/// Ranks entities by total occurrence count, descending.
///
/// The optional country filter applies to the owning article of each
/// occurrence's analysis. Ties break alphabetically so the ordering is
/// stable across runs.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn rank_entities(
    pool: &PgPool,
    country: Option<Country>,
    take: i64,
) -> Result<Vec<EntityRankRow>, DbError> {
    let rows = sqlx::query_as::<_, EntityRankRow>(
        "SELECT e.id, e.name, e.type AS kind, SUM(eo.count)::BIGINT AS mentions \
         FROM entity_occurrences eo \
         JOIN entities e ON e.id = eo.entity_id \
         JOIN analyses a ON a.id = eo.analysis_id \
         JOIN articles ar ON ar.id = a.article_id \
         WHERE ($1::TEXT IS NULL OR ar.country = $1) \
         GROUP BY e.id, e.name, e.type \
         ORDER BY mentions DESC, e.name ASC \
         LIMIT $2",
    )
    .bind(country.map(Country::as_str))
    .bind(take)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
