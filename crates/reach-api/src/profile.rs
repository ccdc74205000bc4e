use axum::{Extension, Json, extract::State};

use reach_engine::entities;
use reach_types::api::{AccountRole, Claims, UpdateProfileRequest};
use reach_types::models::Influencer;

use crate::auth::AppState;
use crate::blocking;
use crate::error::{ApiError, ApiResult};

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<Json<Influencer>> {
    require_influencer(&claims)?;
    let influencer_id = claims.sub;
    let profile =
        blocking(move || Ok(entities::influencer(&state.store, influencer_id)?)).await?;
    Ok(Json(profile))
}

/// Partial profile update. Replacing the keyword set here is what feeds the
/// matching engine; brief keywords on the campaign side are derived at rank
/// time instead.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<Influencer>> {
    require_influencer(&claims)?;
    let influencer_id = claims.sub;
    let profile = blocking(move || {
        Ok(entities::update_influencer_profile(
            &state.store,
            influencer_id,
            &req,
        )?)
    })
    .await?;
    Ok(Json(profile))
}

fn require_influencer(claims: &Claims) -> ApiResult<()> {
    if claims.role != AccountRole::Influencer {
        return Err(ApiError::Forbidden);
    }
    Ok(())
}
