use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use newsvane_core::Country;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct EntitiesQuery {
    pub country: Option<String>,
    pub take: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(super) struct EntityRankItem {
    id: i64,
    name: String,
    #[serde(rename = "type")]
    kind: String,
    mentions: i64,
}

pub(super) async fn rank_entities(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<EntitiesQuery>,
) -> Result<Json<ApiResponse<Vec<EntityRankItem>>>, ApiError> {
    // An unrecognised country is treated as absent: the ranking is then
    // unfiltered rather than rejected.
    let country: Option<Country> = query.country.as_deref().and_then(|c| c.parse().ok());
    let take = newsvane_db::clamp_take(query.take);

    let rows = newsvane_db::rank_entities(&state.pool, country, take)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| EntityRankItem {
            id: row.id,
            name: row.name,
            kind: row.kind,
            mentions: row.mentions,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
