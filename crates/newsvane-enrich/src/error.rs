use thiserror::Error;

use crate::scorer::ScorerError;

/// Fatal errors for a whole ingestion invocation.
///
/// A transport failure poisons the entire page, so it aborts the batch;
/// records already written by earlier pages stay committed.
#[derive(Debug, Error)]
pub enum EnrichError {
    /// No news source credential is configured. Checked before the first
    /// fetch so a misconfigured process fails fast.
    #[error("missing news source credential (NEWSAPI_KEY)")]
    MissingCredential,

    /// The external source rejected or failed a page fetch.
    #[error(transparent)]
    Source(#[from] newsvane_newsapi::NewsApiError),
}

/// Non-fatal errors scoped to one candidate article.
///
/// These are logged and the candidate is skipped; the batch continues.
#[derive(Debug, Error)]
pub enum ArticleError {
    #[error(transparent)]
    Scorer(#[from] ScorerError),

    #[error(transparent)]
    Db(#[from] newsvane_db::DbError),
}
