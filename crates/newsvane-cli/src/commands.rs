//! CLI command implementations.

use chrono::Utc;
use sqlx::PgPool;

use newsvane_core::{AppConfig, Country, Range};
use newsvane_enrich::{run_ingestion, EventBus, IngestOptions, SentimentScorer};

/// Run one ingestion pass and print the JSON summary.
///
/// # Errors
///
/// Returns an error if the scorer cannot be constructed, the credential is
/// missing, or the source fetch fails. Individual article failures are
/// logged and skipped, not propagated.
pub(crate) async fn run_ingest(
    pool: &PgPool,
    config: &AppConfig,
    term: &str,
    days: Option<i64>,
    page_size: Option<u32>,
    country: Option<&str>,
    domains: Option<String>,
) -> anyhow::Result<()> {
    let scorer = SentimentScorer::from_config(config)
        .map_err(|e| anyhow::anyhow!("sentiment backend selection failed: {e}"))?;

    // No live subscribers in a one-shot CLI run; publishes are no-ops.
    let bus = EventBus::default();

    let mut opts = IngestOptions::new(term);
    if let Some(days) = days {
        opts.days = days;
    }
    if let Some(page_size) = page_size {
        opts.page_size = page_size;
    }
    if let Some(country) = country {
        opts.country = country.parse::<Country>()?;
    }
    opts.domains = domains;

    let summary = run_ingestion(pool, config, &scorer, &bus, &opts).await?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Seed demo articles and print how many were processed.
///
/// # Errors
///
/// Returns an error if any database write fails; the seed batch is
/// transactional, so a failure leaves nothing behind.
pub(crate) async fn run_seed(pool: &PgPool) -> anyhow::Result<()> {
    let count = newsvane_db::seed::seed_demo_data(pool).await?;
    println!("seeded {count} demo articles");
    Ok(())
}

/// Print the daily sentiment series for a term as JSON.
///
/// # Errors
///
/// Returns an error if the country is invalid or the query fails.
pub(crate) async fn run_insights(
    pool: &PgPool,
    term: &str,
    range: Option<&str>,
    country: Option<&str>,
) -> anyhow::Result<()> {
    let term = term.trim().to_lowercase();
    let country = match country {
        Some(raw) => raw.parse::<Country>()?,
        None => Country::default(),
    };
    let range = Range::parse(range);
    let since = range.since(Utc::now());

    let points = newsvane_db::sentiment_series(pool, &term, country, since).await?;

    let report = serde_json::json!({
        "term": term,
        "range": range.label,
        "points": points
            .iter()
            .map(|point| {
                serde_json::json!({
                    "date": point.date.to_string(),
                    "avgSentiment": point.avg_sentiment,
                    "sources": point
                        .sources
                        .iter()
                        .map(|s| serde_json::json!({ "source": s.source, "count": s.count }))
                        .collect::<Vec<_>>(),
                })
            })
            .collect::<Vec<_>>(),
    });

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
