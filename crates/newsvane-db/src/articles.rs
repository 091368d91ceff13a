//! Database operations for the `articles` table.

use chrono::{DateTime, Utc};
use newsvane_core::Country;
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `articles` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ArticleRow {
    pub id: i64,
    pub source: String,
    pub title: String,
    pub url: String,
    pub published_at: DateTime<Utc>,
    pub author: Option<String>,
    pub raw_text: Option<String>,
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for [`upsert_article`]. Borrowed fields; the url is the natural key.
#[derive(Debug, Clone, Copy)]
pub struct NewArticle<'a> {
    pub source: &'a str,
    pub title: &'a str,
    pub url: &'a str,
    pub published_at: DateTime<Utc>,
    pub author: Option<&'a str>,
    pub raw_text: Option<&'a str>,
    pub country: Country,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Upserts an article keyed by its URL.
///
/// A conflict on `url` updates the mutable fields (`source`, `title`,
/// `published_at`, `author`, `raw_text`, `country`) and `updated_at` in
/// place; the row id is stable across re-ingestions and any analyses
/// already attached to it are untouched.
///
/// Returns the internal `id` of the upserted row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_article(pool: &PgPool, article: &NewArticle<'_>) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar::<_, i64>(
        "INSERT INTO articles \
             (source, title, url, published_at, author, raw_text, country) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         ON CONFLICT (url) DO UPDATE SET \
             source       = EXCLUDED.source, \
             title        = EXCLUDED.title, \
             published_at = EXCLUDED.published_at, \
             author       = EXCLUDED.author, \
             raw_text     = EXCLUDED.raw_text, \
             country      = EXCLUDED.country, \
             updated_at   = NOW() \
         RETURNING id",
    )
    .bind(article.source)
    .bind(article.title)
    .bind(article.url)
    .bind(article.published_at)
    .bind(article.author)
    .bind(article.raw_text)
    .bind(article.country.as_str())
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Lists recent articles, newest first, optionally filtered by a
/// case-insensitive title substring.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_articles(
    pool: &PgPool,
    term: Option<&str>,
    limit: i64,
) -> Result<Vec<ArticleRow>, DbError> {
    let pattern = term
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| format!("%{t}%"));

    let rows = sqlx::query_as::<_, ArticleRow>(
        "SELECT id, source, title, url, published_at, author, raw_text, country, \
                created_at, updated_at \
         FROM articles \
         WHERE ($1::TEXT IS NULL OR title ILIKE $1) \
         ORDER BY published_at DESC \
         LIMIT $2",
    )
    .bind(pattern)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
