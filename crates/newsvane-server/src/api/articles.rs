use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct ArticlesQuery {
    pub term: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(super) struct ArticleItem {
    id: i64,
    source: String,
    title: String,
    url: String,
    published_at: DateTime<Utc>,
    author: Option<String>,
    country: String,
}

pub(super) async fn list_articles(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ArticlesQuery>,
) -> Result<Json<ApiResponse<Vec<ArticleItem>>>, ApiError> {
    let term = query.term.as_deref().map(str::to_lowercase);

    let rows = newsvane_db::list_articles(
        &state.pool,
        term.as_deref(),
        normalize_limit(query.limit),
    )
    .await
    .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| ArticleItem {
            id: row.id,
            source: row.source,
            title: row.title,
            url: row.url,
            published_at: row.published_at,
            author: row.author,
            country: row.country,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
