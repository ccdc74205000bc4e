use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    Application, ApplicationStatus, Influencer, Invite, InviteStatus, SubmissionStatus,
};

// -- JWT Claims --

/// JWT claims shared between the auth handlers and the request middleware.
/// `role` distinguishes brand accounts from influencer accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: AccountRole,
    pub exp: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    Brand,
    Influencer,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterBrandRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterInfluencerRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user_id: Uuid,
    pub role: AccountRole,
    pub token: String,
}

// -- Campaigns --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateCampaignRequest {
    pub name: String,
    pub goal: Option<String>,
    pub target_audience: Option<String>,
    pub target_location: Option<String>,
    pub budget: f64,
    pub brief: String,
    #[serde(default)]
    pub is_public: bool,
}

/// Brand-facing campaign detail: the campaign plus every invite on it,
/// each enriched with the influencer and the latest submission.
#[derive(Debug, Serialize)]
pub struct CampaignDetailResponse {
    pub id: Uuid,
    pub name: String,
    pub budget: f64,
    pub brief: String,
    pub is_public: bool,
    pub invites: Vec<CampaignInviteRow>,
}

#[derive(Debug, Serialize)]
pub struct CampaignInviteRow {
    pub invite_id: Uuid,
    pub status: InviteStatus,
    pub influencer: Influencer,
    pub submission_id: Option<Uuid>,
    pub submission_url: Option<String>,
    pub submission_status: Option<SubmissionStatus>,
}

#[derive(Debug, Serialize)]
pub struct PublicCampaign {
    pub id: Uuid,
    pub name: String,
    pub goal: Option<String>,
    pub brief: String,
    pub budget: f64,
    pub target_location: Option<String>,
}

// -- Matching & search --

#[derive(Debug, Serialize)]
pub struct RankedMatch {
    pub influencer: Influencer,
    pub match_score: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub niche: Option<String>,
    pub location: Option<String>,
    pub min_followers: Option<u64>,
    pub max_followers: Option<u64>,
}

// -- Engagement lifecycle --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateInviteRequest {
    pub campaign_id: Uuid,
    pub influencer_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RespondInviteRequest {
    pub decision: InviteDecision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InviteDecision {
    Accepted,
    Declined,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubmitApplicationRequest {
    pub campaign_id: Uuid,
    pub influencer_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReviewApplicationRequest {
    pub decision: ApplicationDecision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationDecision {
    Approved,
    Rejected,
}

/// Review outcome: the updated application, plus the invite created when the
/// decision was `approved`.
#[derive(Debug, Serialize)]
pub struct ReviewApplicationResponse {
    pub application: Application,
    pub invite: Option<Invite>,
}

#[derive(Debug, Serialize)]
pub struct ApplicationRow {
    pub application_id: Uuid,
    pub status: ApplicationStatus,
    pub influencer: Influencer,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubmitContentRequest {
    pub invite_id: Uuid,
    pub content_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReviewSubmissionRequest {
    pub decision: SubmissionDecision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionDecision {
    Approved,
    RevisionRequested,
}

// -- Influencer profile --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub niche: Option<String>,
    pub followers: Option<u64>,
    pub engagement_rate: Option<f64>,
    pub audience_age_range: Option<String>,
    pub audience_gender_split: Option<String>,
}
