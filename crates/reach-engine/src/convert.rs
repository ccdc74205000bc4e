//! Row-to-domain conversion. The store hands back string-typed rows; the
//! engine owns turning them into the typed models, treating anything that
//! fails to parse as storage corruption rather than a caller error.

use anyhow::{Context, anyhow};
use chrono::{DateTime, NaiveDateTime, Utc};
use uuid::Uuid;

use reach_db::models::{ApplicationRow, CampaignRow, InfluencerRow, InviteRow, SubmissionRow};
use reach_types::models::{
    Application, ApplicationStatus, Campaign, Influencer, Invite, InviteStatus, Niche, Submission,
    SubmissionStatus,
};

use crate::error::EngineResult;

pub fn influencer(row: &InfluencerRow) -> EngineResult<Influencer> {
    Ok(Influencer {
        id: parse_id(&row.id, "influencer")?,
        name: row.name.clone(),
        niche: match row.niche.as_deref() {
            Some(s) => Some(
                s.parse::<Niche>()
                    .map_err(|e| anyhow!("influencer {}: {}", row.id, e))?,
            ),
            None => None,
        },
        location: row.location.clone(),
        followers: row.followers.max(0) as u64,
        engagement_rate: row.engagement_rate,
        audience_age_range: row.audience_age_range.clone(),
        audience_gender_split: row.audience_gender_split.clone(),
        keywords: split_keywords(&row.keywords),
    })
}

pub fn campaign(row: &CampaignRow) -> EngineResult<Campaign> {
    Ok(Campaign {
        id: parse_id(&row.id, "campaign")?,
        brand_id: parse_id(&row.brand_id, "brand")?,
        name: row.name.clone(),
        goal: row.goal.clone(),
        target_audience: row.target_audience.clone(),
        target_location: row.target_location.clone(),
        budget: row.budget,
        brief: row.brief.clone(),
        is_public: row.is_public,
        created_at: parse_timestamp(&row.created_at)?,
    })
}

pub fn invite(row: &InviteRow, submission_id: Option<Uuid>) -> EngineResult<Invite> {
    Ok(Invite {
        id: parse_id(&row.id, "invite")?,
        campaign_id: parse_id(&row.campaign_id, "campaign")?,
        influencer_id: parse_id(&row.influencer_id, "influencer")?,
        status: invite_status(&row.status)?,
        submission_id,
        created_at: parse_timestamp(&row.created_at)?,
    })
}

pub fn application(row: &ApplicationRow) -> EngineResult<Application> {
    Ok(Application {
        id: parse_id(&row.id, "application")?,
        campaign_id: parse_id(&row.campaign_id, "campaign")?,
        influencer_id: parse_id(&row.influencer_id, "influencer")?,
        status: application_status(&row.status)?,
        created_at: parse_timestamp(&row.created_at)?,
    })
}

pub fn submission(row: &SubmissionRow) -> EngineResult<Submission> {
    Ok(Submission {
        id: parse_id(&row.id, "submission")?,
        invite_id: parse_id(&row.invite_id, "invite")?,
        content_url: row.content_url.clone(),
        status: submission_status(&row.status)?,
        created_at: parse_timestamp(&row.created_at)?,
    })
}

pub fn invite_status(s: &str) -> EngineResult<InviteStatus> {
    match s {
        "pending" => Ok(InviteStatus::Pending),
        "accepted" => Ok(InviteStatus::Accepted),
        "declined" => Ok(InviteStatus::Declined),
        other => Err(anyhow!("unknown invite status: {}", other).into()),
    }
}

pub fn application_status(s: &str) -> EngineResult<ApplicationStatus> {
    match s {
        "pending" => Ok(ApplicationStatus::Pending),
        "approved" => Ok(ApplicationStatus::Approved),
        "rejected" => Ok(ApplicationStatus::Rejected),
        other => Err(anyhow!("unknown application status: {}", other).into()),
    }
}

pub fn submission_status(s: &str) -> EngineResult<SubmissionStatus> {
    match s {
        "pending_review" => Ok(SubmissionStatus::PendingReview),
        "approved" => Ok(SubmissionStatus::Approved),
        "revision_requested" => Ok(SubmissionStatus::RevisionRequested),
        other => Err(anyhow!("unknown submission status: {}", other).into()),
    }
}

pub fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|kw| kw.trim().to_string())
        .filter(|kw| !kw.is_empty())
        .collect()
}

fn parse_id(raw: &str, entity: &'static str) -> EngineResult<Uuid> {
    let id = raw
        .parse::<Uuid>()
        .with_context(|| format!("corrupt {} id: {}", entity, raw))?;
    Ok(id)
}

fn parse_timestamp(raw: &str) -> EngineResult<DateTime<Utc>> {
    // SQLite stores timestamps as "YYYY-MM-DD HH:MM:SS" without timezone.
    let ts = raw
        .parse::<DateTime<Utc>>()
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .with_context(|| format!("corrupt timestamp: {}", raw))?;
    Ok(ts)
}
