//! Database operations for `entities` and `entity_occurrences`.

use chrono::{DateTime, Utc};
use newsvane_core::EntityKind;
use sqlx::PgPool;

use crate::DbError;

/// A row from the `entities` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EntityRow {
    pub id: i64,
    pub name: String,
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Upserts an entity keyed by its name.
///
/// First sighting creates the row; later sightings update the type
/// classification last-write-wins, so an entity reclassified by a newer
/// extraction pass carries the newer kind.
///
/// Returns the internal `id` of the upserted row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_entity(pool: &PgPool, name: &str, kind: EntityKind) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar::<_, i64>(
        "INSERT INTO entities (name, type) \
         VALUES ($1, $2) \
         ON CONFLICT (name) DO UPDATE SET \
             type       = EXCLUDED.type, \
             updated_at = NOW() \
         RETURNING id",
    )
    .bind(name)
    .bind(kind.as_str())
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Inserts one occurrence linking an entity to an analysis.
///
/// Occurrences are append-only: one row per (entity, analysis) pair per
/// extraction pass. The extractor deduplicates within a pass, so `count`
/// is a presence indicator (always 1 from the pipeline), not a raw
/// mention frequency.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_occurrence(
    pool: &PgPool,
    entity_id: i64,
    analysis_id: i64,
    count: i32,
) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar::<_, i64>(
        "INSERT INTO entity_occurrences (entity_id, analysis_id, count) \
         VALUES ($1, $2, $3) \
         RETURNING id",
    )
    .bind(entity_id)
    .bind(analysis_id)
    .bind(count)
    .fetch_one(pool)
    .await?;

    Ok(id)
}
