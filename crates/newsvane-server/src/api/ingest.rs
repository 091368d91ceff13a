use axum::{
    extract::State,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use newsvane_core::Country;
use newsvane_enrich::{run_ingestion, EnrichError, IngestOptions};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct IngestRequest {
    pub term: String,
    pub days: Option<i64>,
    pub page_size: Option<u32>,
    pub country: Option<String>,
    pub domains: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct IngestResult {
    term: String,
    country: Country,
    fetched: usize,
    analyzed: usize,
}

pub(super) async fn trigger_ingest(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<IngestRequest>,
) -> Result<Json<ApiResponse<IngestResult>>, ApiError> {
    let country = request
        .country
        .as_deref()
        .and_then(|c| c.parse().ok())
        .unwrap_or_default();

    let opts = IngestOptions {
        term: request.term,
        days: request.days.unwrap_or(3),
        page_size: request.page_size.unwrap_or(50),
        country,
        domains: request.domains,
    };

    let summary = run_ingestion(&state.pool, &state.config, &state.scorer, &state.bus, &opts)
        .await
        .map_err(|e| map_enrich_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: IngestResult {
            term: summary.term,
            country: summary.country,
            fetched: summary.fetched,
            analyzed: summary.analyzed,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Configuration problems and transient source failures get distinct codes
/// so a caller can tell a broken deployment from a broken upstream.
fn map_enrich_error(request_id: String, error: &EnrichError) -> ApiError {
    match error {
        EnrichError::MissingCredential => {
            tracing::error!("ingestion rejected: news source credential not configured");
            ApiError::new(request_id, "config_error", error.to_string())
        }
        EnrichError::Source(source) => {
            tracing::error!(error = %source, "ingestion aborted: source fetch failed");
            ApiError::new(request_id, "source_fetch_failed", source.to_string())
        }
    }
}
