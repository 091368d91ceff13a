//! Ingestion pipeline orchestration.

use chrono::{Duration, Utc};
use sqlx::PgPool;

use newsvane_core::AppConfig;
use newsvane_newsapi::{EverythingParams, NewsApiClient};

use crate::entities::extract_entities;
use crate::error::{ArticleError, EnrichError};
use crate::events::{AnalysisCreatedPayload, EventBus, IngestEvent};
use crate::normalize::{entity_basis, normalize_candidate, sentiment_basis, NormalizedArticle};
use crate::scorer::SentimentScorer;
use crate::types::{IngestOptions, IngestSummary};

/// Entities extracted per article, hard cap.
const ENTITY_LIMIT: usize = 25;

/// Run one ingestion invocation for a single term.
///
/// 1. Validate config: a news source credential must be present.
/// 2. Page loop: fetch candidate pages matching `term AND country-context`
///    within `[now - days, now - 1 day]`, sorted by publication time, up to
///    the configured page cap. An empty page means the source is exhausted
///    and stops the loop early; fewer items than requested is not an error.
/// 3. Per candidate: normalize (candidates without a URL and title are
///    silently skipped), upsert the article by URL, score sentiment over
///    title and description, create the analysis, extract and persist up
///    to 25 entities with one occurrence each, publish `ANALYSIS_CREATED`.
///    Any per-article failure is logged and skipped; the batch continues.
/// 4. Return `{term, country, fetched, analyzed}`.
///
/// The page loop and the per-article loop are sequential, bounding the
/// request rate against the source and avoiding concurrent writes for the
/// same URL. An optional configured delay is inserted between articles.
///
/// # Errors
///
/// - [`EnrichError::MissingCredential`] if no source credential is
///   configured (pre-flight, nothing is fetched or written).
/// - [`EnrichError::Source`] if a page fetch fails; the whole invocation
///   aborts because the page, not one article, is untrustworthy. Records
///   written by earlier pages stay committed.
pub async fn run_ingestion(
    pool: &PgPool,
    config: &AppConfig,
    scorer: &SentimentScorer,
    bus: &EventBus,
    opts: &IngestOptions,
) -> Result<IngestSummary, EnrichError> {
    let api_key = config
        .newsapi_key
        .as_deref()
        .ok_or(EnrichError::MissingCredential)?;

    let client = match config.newsapi_base_url.as_deref() {
        Some(base_url) => {
            NewsApiClient::with_base_url(api_key, config.newsapi_timeout_secs, base_url)?
        }
        None => NewsApiClient::new(api_key, config.newsapi_timeout_secs)?,
    };

    let now = Utc::now();
    let to = now - Duration::days(1);
    let from = to - Duration::days(opts.clamped_days());

    let params = EverythingParams {
        query: format!("({}) AND {}", opts.term, opts.country.query_fragment()),
        language: "en".to_string(),
        page_size: opts.clamped_page_size(),
        from,
        to,
        sort_by: "publishedAt".to_string(),
        domains: opts.trimmed_domains(),
    };

    let topics = vec![opts.term.trim().to_lowercase()];
    let mut fetched = 0usize;
    let mut analyzed = 0usize;

    for page in 1..=config.ingest_max_pages {
        let items = client.everything(&params, page).await?;
        if items.is_empty() {
            break;
        }
        fetched += items.len();

        for raw in &items {
            let Some(candidate) = normalize_candidate(raw, Utc::now()) else {
                continue;
            };

            match enrich_article(pool, scorer, bus, opts, &topics, &candidate).await {
                Ok(()) => analyzed += 1,
                Err(e) => {
                    tracing::warn!(
                        term = %opts.term,
                        url = %candidate.url,
                        error = %e,
                        "article skipped"
                    );
                }
            }

            if config.ingest_sleep_ms > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(config.ingest_sleep_ms)).await;
            }
        }
    }

    tracing::info!(
        term = %opts.term,
        country = %opts.country,
        fetched,
        analyzed,
        "ingestion run complete"
    );

    Ok(IngestSummary {
        term: opts.term.clone(),
        country: opts.country,
        fetched,
        analyzed,
    })
}

/// Enrich one normalized candidate: upsert, score, persist, publish.
async fn enrich_article(
    pool: &PgPool,
    scorer: &SentimentScorer,
    bus: &EventBus,
    opts: &IngestOptions,
    topics: &[String],
    candidate: &NormalizedArticle,
) -> Result<(), ArticleError> {
    let article_id = newsvane_db::upsert_article(
        pool,
        &newsvane_db::NewArticle {
            source: &candidate.source,
            title: &candidate.title,
            url: &candidate.url,
            published_at: candidate.published_at,
            author: candidate.author.as_deref(),
            raw_text: candidate.body.as_deref(),
            country: opts.country,
        },
    )
    .await?;

    let score = scorer.score(&sentiment_basis(candidate)).await?;
    // Clamp and round at the persistence boundary regardless of backend.
    let sentiment = ((score.clamp(0.0, 1.0)) * 1000.0).round() / 1000.0;

    let analysis_id =
        newsvane_db::insert_analysis(pool, article_id, sentiment, topics, serde_json::json!({}))
            .await?;

    for entity in extract_entities(&entity_basis(candidate), ENTITY_LIMIT) {
        let entity_id = newsvane_db::upsert_entity(pool, &entity.name, entity.kind).await?;
        newsvane_db::insert_occurrence(pool, entity_id, analysis_id, 1).await?;
    }

    bus.publish(IngestEvent::AnalysisCreated(AnalysisCreatedPayload {
        article_id,
        analysis_id,
        sentiment,
        title: candidate.title.clone(),
        published_at: candidate.published_at,
    }));

    Ok(())
}
