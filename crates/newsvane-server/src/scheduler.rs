//! Background job scheduler.
//!
//! Initialises a [`JobScheduler`] at server startup and registers the
//! recurring ingestion job. The scheduler fires a single job instance per
//! tick and the job body awaits each term in turn, which gives the
//! at-most-one-concurrent-run guarantee the pipeline itself does not
//! provide.

use std::sync::Arc;

use sqlx::PgPool;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use newsvane_core::AppConfig;
use newsvane_enrich::{run_ingestion, EventBus, IngestOptions, SentimentScorer};

/// Builds and starts the background job scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive
/// for the lifetime of the process — dropping it shuts down all jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// the job cannot be registered, or the scheduler fails to start.
pub async fn build_scheduler(
    pool: PgPool,
    config: Arc<AppConfig>,
    scorer: Arc<SentimentScorer>,
    bus: EventBus,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    register_ingestion_job(&scheduler, pool, config, scorer, bus).await?;

    scheduler.start().await?;
    Ok(scheduler)
}

/// Register the hourly ingestion job.
///
/// Runs at five past every hour (`0 5 * * * *`). Each run walks the
/// configured terms and invokes the pipeline once per term; a failed term
/// is logged and never aborts the remaining terms.
async fn register_ingestion_job(
    scheduler: &JobScheduler,
    pool: PgPool,
    config: Arc<AppConfig>,
    scorer: Arc<SentimentScorer>,
    bus: EventBus,
) -> Result<(), JobSchedulerError> {
    let pool = Arc::new(pool);

    let job = Job::new_async("0 5 * * * *", move |_uuid, _lock| {
        let pool = Arc::clone(&pool);
        let config = Arc::clone(&config);
        let scorer = Arc::clone(&scorer);
        let bus = bus.clone();

        Box::pin(async move {
            tracing::info!("scheduler: starting hourly ingestion run");
            run_ingestion_job(&pool, &config, &scorer, &bus).await;
            tracing::info!("scheduler: hourly ingestion run complete");
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}

/// Drive one pipeline invocation per configured term.
async fn run_ingestion_job(
    pool: &PgPool,
    config: &AppConfig,
    scorer: &SentimentScorer,
    bus: &EventBus,
) {
    if config.ingest_terms.is_empty() {
        tracing::info!("scheduler: no ingestion terms configured; skipping");
        return;
    }

    for term in &config.ingest_terms {
        let opts = IngestOptions {
            term: term.clone(),
            days: config.ingest_days,
            page_size: config.ingest_page_size,
            country: config.ingest_country,
            domains: config.ingest_domains.clone(),
        };

        match run_ingestion(pool, config, scorer, bus, &opts).await {
            Ok(summary) => {
                tracing::info!(
                    term = %summary.term,
                    country = %summary.country,
                    fetched = summary.fetched,
                    analyzed = summary.analyzed,
                    "scheduler: term ingested"
                );
            }
            Err(e) => {
                tracing::error!(term = %term, error = %e, "scheduler: term ingestion failed");
            }
        }
    }
}
