use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;

use reach_types::api::{Claims, RankedMatch, SearchQuery};
use reach_types::models::Influencer;

use crate::auth::AppState;
use crate::blocking;
use crate::error::ApiResult;

/// Ranked candidate list for a campaign brief. Recomputed on every call.
pub async fn rank_candidates(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
    Extension(_claims): Extension<Claims>,
) -> ApiResult<Json<Vec<RankedMatch>>> {
    let matches = blocking(move || Ok(state.matching.rank(campaign_id)?)).await?;
    Ok(Json(matches))
}

/// Filtered influencer catalog; used for interactive live filtering, so the
/// handler stays read-only and cheap to call repeatedly.
pub async fn search_catalog(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
    Extension(_claims): Extension<Claims>,
) -> ApiResult<Json<Vec<Influencer>>> {
    let results = blocking(move || Ok(state.matching.search(&query)?)).await?;
    Ok(Json(results))
}
