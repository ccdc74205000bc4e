use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use reach_engine::entities;
use reach_types::api::{
    AccountRole, Claims, CreateInviteRequest, RespondInviteRequest, ReviewApplicationRequest,
    ReviewApplicationResponse, ReviewSubmissionRequest, SubmitApplicationRequest,
    SubmitContentRequest,
};
use reach_types::models::{Invite, Project, Submission};

use crate::auth::AppState;
use crate::blocking;
use crate::error::{ApiError, ApiResult};

// -- Invites --

/// Brand invites an influencer to a campaign. A duplicate pair comes back as
/// a 409 with code CONFLICT, which the client treats as "already invited".
pub async fn create_invite(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateInviteRequest>,
) -> ApiResult<impl IntoResponse> {
    require_role(&claims, AccountRole::Brand)?;

    let invite = blocking(move || {
        let campaign = entities::campaign(&state.store, req.campaign_id)?;
        if campaign.brand_id != claims.sub {
            return Err(ApiError::Forbidden);
        }
        Ok(state.lifecycle.create_invite(req.campaign_id, req.influencer_id)?)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(invite)))
}

/// Influencer accepts or declines a pending invite addressed to them.
pub async fn respond_invite(
    State(state): State<AppState>,
    Path(invite_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<RespondInviteRequest>,
) -> ApiResult<Json<Invite>> {
    require_role(&claims, AccountRole::Influencer)?;

    let invite = blocking(move || {
        let invite = state.lifecycle.get_invite(invite_id)?;
        if invite.influencer_id != claims.sub {
            return Err(ApiError::Forbidden);
        }
        Ok(state.lifecycle.respond_invite(invite_id, req.decision)?)
    })
    .await?;

    Ok(Json(invite))
}

// -- Applications --

/// Influencer applies to a public campaign.
pub async fn submit_application(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SubmitApplicationRequest>,
) -> ApiResult<impl IntoResponse> {
    require_role(&claims, AccountRole::Influencer)?;
    if req.influencer_id != claims.sub {
        return Err(ApiError::Forbidden);
    }

    let application = blocking(move || {
        Ok(state
            .lifecycle
            .submit_application(req.campaign_id, req.influencer_id)?)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(application)))
}

/// Brand reviews a pending application; approval also returns the invite it
/// materialized.
pub async fn review_application(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<ReviewApplicationRequest>,
) -> ApiResult<Json<ReviewApplicationResponse>> {
    require_role(&claims, AccountRole::Brand)?;

    let response = blocking(move || {
        let application = state.lifecycle.get_application(application_id)?;
        let campaign = entities::campaign(&state.store, application.campaign_id)?;
        if campaign.brand_id != claims.sub {
            return Err(ApiError::Forbidden);
        }

        let (application, invite) = state
            .lifecycle
            .review_application(application_id, req.decision)?;
        Ok(ReviewApplicationResponse { application, invite })
    })
    .await?;

    Ok(Json(response))
}

// -- Submissions --

/// Influencer delivers content against an accepted invite.
pub async fn submit_content(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SubmitContentRequest>,
) -> ApiResult<impl IntoResponse> {
    require_role(&claims, AccountRole::Influencer)?;

    let submission = blocking(move || {
        let invite = state.lifecycle.get_invite(req.invite_id)?;
        if invite.influencer_id != claims.sub {
            return Err(ApiError::Forbidden);
        }
        Ok(state.lifecycle.submit_content(req.invite_id, &req.content_url)?)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(submission)))
}

/// Brand approves a submission or requests a revision.
pub async fn review_submission(
    State(state): State<AppState>,
    Path(submission_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<ReviewSubmissionRequest>,
) -> ApiResult<Json<Submission>> {
    require_role(&claims, AccountRole::Brand)?;

    let submission = blocking(move || {
        let submission = state.lifecycle.get_submission(submission_id)?;
        let invite = state.lifecycle.get_invite(submission.invite_id)?;
        let campaign = entities::campaign(&state.store, invite.campaign_id)?;
        if campaign.brand_id != claims.sub {
            return Err(ApiError::Forbidden);
        }
        Ok(state.lifecycle.review_submission(submission_id, req.decision)?)
    })
    .await?;

    Ok(Json(submission))
}

// -- Projects --

/// The influencer's merged invitation/application view.
pub async fn list_projects(
    State(state): State<AppState>,
    Path(influencer_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<Json<Vec<Project>>> {
    require_role(&claims, AccountRole::Influencer)?;
    if influencer_id != claims.sub {
        return Err(ApiError::Forbidden);
    }

    let projects = blocking(move || Ok(state.lifecycle.list_projects(influencer_id)?)).await?;
    Ok(Json(projects))
}

fn require_role(claims: &Claims, role: AccountRole) -> ApiResult<()> {
    if claims.role != role {
        return Err(ApiError::Forbidden);
    }
    Ok(())
}
