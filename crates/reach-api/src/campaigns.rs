use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use reach_engine::entities;
use reach_types::api::{
    AccountRole, ApplicationRow, CampaignDetailResponse, Claims, CreateCampaignRequest,
    PublicCampaign,
};
use reach_types::models::Campaign;

use crate::auth::AppState;
use crate::blocking;
use crate::error::{ApiError, ApiResult};

pub async fn create_campaign(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateCampaignRequest>,
) -> ApiResult<impl IntoResponse> {
    require_brand(&claims)?;
    if req.name.trim().is_empty() || req.brief.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "campaign name and brief must not be empty".into(),
        ));
    }
    if !req.budget.is_finite() || req.budget < 0.0 {
        return Err(ApiError::BadRequest("budget must be a non-negative number".into()));
    }

    let campaign_id = Uuid::new_v4();
    let brand_id = claims.sub;
    let state2 = state.clone();
    let campaign = blocking(move || {
        state2.store.create_campaign(
            &campaign_id.to_string(),
            &brand_id.to_string(),
            req.name.trim(),
            req.goal.as_deref(),
            req.target_audience.as_deref(),
            req.target_location.as_deref(),
            req.budget,
            &req.brief,
            req.is_public,
        )?;
        Ok(entities::campaign(&state2.store, campaign_id)?)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(campaign)))
}

pub async fn list_my_campaigns(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<Json<Vec<Campaign>>> {
    require_brand(&claims)?;
    let brand_id = claims.sub;
    let campaigns =
        blocking(move || Ok(entities::campaigns_for_brand(&state.store, brand_id)?)).await?;
    Ok(Json(campaigns))
}

/// Public campaign catalog for the project exchange; no ownership filter.
pub async fn list_public_campaigns(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<PublicCampaign>>> {
    let campaigns = blocking(move || Ok(entities::public_campaigns(&state.store)?)).await?;
    let listings = campaigns
        .into_iter()
        .map(|c| PublicCampaign {
            id: c.id,
            name: c.name,
            goal: c.goal,
            brief: c.brief,
            budget: c.budget,
            target_location: c.target_location,
        })
        .collect();
    Ok(Json(listings))
}

pub async fn campaign_detail(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<Json<CampaignDetailResponse>> {
    let detail = blocking(move || {
        let campaign = entities::campaign(&state.store, campaign_id)?;
        require_owner(&claims, &campaign)?;
        let invites = state.lifecycle.list_campaign_invites(campaign_id)?;
        Ok(CampaignDetailResponse {
            id: campaign.id,
            name: campaign.name,
            budget: campaign.budget,
            brief: campaign.brief,
            is_public: campaign.is_public,
            invites,
        })
    })
    .await?;
    Ok(Json(detail))
}

pub async fn campaign_applications(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<Json<Vec<ApplicationRow>>> {
    let rows = blocking(move || {
        let campaign = entities::campaign(&state.store, campaign_id)?;
        require_owner(&claims, &campaign)?;
        Ok(state.lifecycle.list_campaign_applications(campaign_id)?)
    })
    .await?;
    Ok(Json(rows))
}

fn require_brand(claims: &Claims) -> ApiResult<()> {
    if claims.role != AccountRole::Brand {
        return Err(ApiError::Forbidden);
    }
    Ok(())
}

fn require_owner(claims: &Claims, campaign: &Campaign) -> ApiResult<()> {
    require_brand(claims)?;
    if campaign.brand_id != claims.sub {
        return Err(ApiError::Forbidden);
    }
    Ok(())
}
