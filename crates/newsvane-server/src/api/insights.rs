use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use newsvane_core::{Country, Range};

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

const DEFAULT_TERM: &str = "climate";
const DEFAULT_MULTI_TERMS: &str = "climate,economy,policy,safety";

#[derive(Debug, Deserialize)]
pub(super) struct SeriesQuery {
    pub term: Option<String>,
    pub range: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct MultiSeriesQuery {
    pub terms: Option<String>,
    pub range: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct SourceCountItem {
    source: String,
    count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SeriesPoint {
    date: NaiveDate,
    avg_sentiment: f64,
    sources: Vec<SourceCountItem>,
}

#[derive(Debug, Serialize)]
pub(super) struct SeriesData {
    term: String,
    range: String,
    points: Vec<SeriesPoint>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct MultiSeriesPoint {
    date: NaiveDate,
    avg_sentiment: f64,
}

#[derive(Debug, Serialize)]
pub(super) struct TermSeries {
    term: String,
    points: Vec<MultiSeriesPoint>,
}

#[derive(Debug, Serialize)]
pub(super) struct MultiSeriesData {
    range: String,
    series: Vec<TermSeries>,
}

/// Invalid country input falls back to the default rather than erroring;
/// aggregation endpoints always prefer returning data.
fn parse_country(raw: Option<&str>) -> Country {
    raw.and_then(|c| c.parse().ok()).unwrap_or_default()
}

pub(super) async fn sentiment_series(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SeriesQuery>,
) -> Result<Json<ApiResponse<SeriesData>>, ApiError> {
    let term = query
        .term
        .as_deref()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TERM.to_string());
    let country = parse_country(query.country.as_deref());
    let range = Range::parse(query.range.as_deref());
    let since = range.since(Utc::now());

    let points = newsvane_db::sentiment_series(&state.pool, &term, country, since)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let points = points
        .into_iter()
        .map(|point| SeriesPoint {
            date: point.date,
            avg_sentiment: point.avg_sentiment,
            sources: point
                .sources
                .into_iter()
                .map(|s| SourceCountItem {
                    source: s.source,
                    count: s.count,
                })
                .collect(),
        })
        .collect();

    Ok(Json(ApiResponse {
        data: SeriesData {
            term,
            range: range.label,
            points,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn sentiment_series_multi(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<MultiSeriesQuery>,
) -> Result<Json<ApiResponse<MultiSeriesData>>, ApiError> {
    let raw_terms = query
        .terms
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_MULTI_TERMS);
    let terms: Vec<String> = raw_terms
        .split(',')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();

    let country = parse_country(query.country.as_deref());
    let range = Range::parse(query.range.as_deref());
    let since = range.since(Utc::now());

    // Terms are queried independently; no cross-term join.
    let mut series = Vec::with_capacity(terms.len());
    for term in terms {
        let points = newsvane_db::sentiment_series(&state.pool, &term, country, since)
            .await
            .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

        series.push(TermSeries {
            term,
            points: points
                .into_iter()
                .map(|point| MultiSeriesPoint {
                    date: point.date,
                    avg_sentiment: point.avg_sentiment,
                })
                .collect(),
        });
    }

    Ok(Json(ApiResponse {
        data: MultiSeriesData {
            range: range.label,
            series,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
