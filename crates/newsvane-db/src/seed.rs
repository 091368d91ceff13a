//! Development seed data.

use chrono::{DateTime, Utc};
use newsvane_core::Country;
use sqlx::PgPool;

use crate::DbError;

/// One seed article with a fixed sentiment for its analysis.
struct SeedArticle {
    source: &'static str,
    title: &'static str,
    url: &'static str,
    published_at: &'static str,
    author: &'static str,
}

const SEED_ARTICLES: &[SeedArticle] = &[
    SeedArticle {
        source: "Example News",
        title: "Climate policy gains momentum",
        url: "https://example.com/a1",
        published_at: "2025-10-10T00:00:00Z",
        author: "A. Smith",
    },
    SeedArticle {
        source: "Global Times",
        title: "Economy and climate talks stall",
        url: "https://example.com/a2",
        published_at: "2025-10-11T00:00:00Z",
        author: "B. Jones",
    },
    SeedArticle {
        source: "Daily Ledger",
        title: "New bill proposes green subsidies",
        url: "https://example.com/a3",
        published_at: "2025-10-12T00:00:00Z",
        author: "C. Lee",
    },
    SeedArticle {
        source: "Daily Ledger",
        title: "Opposition questions policy cost",
        url: "https://example.com/a4",
        published_at: "2025-10-13T00:00:00Z",
        author: "C. Lee",
    },
];

/// Upserts a small fixed set of demo articles with one analysis each.
///
/// Returns the number of articles processed. All writes run inside a
/// single transaction; if any operation fails the entire batch is rolled
/// back. Re-running the seed upserts the same articles (stable ids) but
/// appends fresh analyses, matching the pipeline's append-only semantics.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any database operation fails.
pub async fn seed_demo_data(pool: &PgPool) -> Result<usize, DbError> {
    let mut tx = pool.begin().await?;
    let mut count = 0usize;

    for seed in SEED_ARTICLES {
        let published_at: DateTime<Utc> = seed
            .published_at
            .parse()
            .expect("seed timestamps are valid RFC 3339");

        let article_id: i64 = sqlx::query_scalar(
            "INSERT INTO articles (source, title, url, published_at, author, country) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (url) DO UPDATE SET \
                 source       = EXCLUDED.source, \
                 title        = EXCLUDED.title, \
                 published_at = EXCLUDED.published_at, \
                 author       = EXCLUDED.author, \
                 country      = EXCLUDED.country, \
                 updated_at   = NOW() \
             RETURNING id",
        )
        .bind(seed.source)
        .bind(seed.title)
        .bind(seed.url)
        .bind(published_at)
        .bind(seed.author)
        .bind(Country::Se.as_str())
        .fetch_one(&mut *tx)
        .await?;

        let lower = seed.title.to_lowercase();
        let sentiment = if lower.contains("climate") || lower.contains("green") {
            0.6
        } else {
            0.3
        };

        sqlx::query(
            "INSERT INTO analyses (article_id, sentiment, topics, entities) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(article_id)
        .bind(sentiment)
        .bind(vec!["policy".to_string(), "climate".to_string()])
        .bind(serde_json::json!({ "terms": ["climate", "policy"] }))
        .execute(&mut *tx)
        .await?;

        count += 1;
    }

    tx.commit().await?;
    Ok(count)
}
