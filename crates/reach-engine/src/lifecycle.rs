//! The engagement lifecycle: three interacting state machines over invites,
//! applications, and submissions, plus the influencer-facing project
//! projection.
//!
//! Transition guards live here; pair uniqueness is enforced by the store's
//! UNIQUE(campaign_id, influencer_id) constraints, so a duplicate creation
//! that races past the pre-check still surfaces as a conflict instead of a
//! second row.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use reach_db::Store;
use reach_db::queries::InsertOutcome;
use reach_types::api::{
    ApplicationDecision, ApplicationRow, CampaignInviteRow, InviteDecision, SubmissionDecision,
};
use reach_types::models::{
    Application, ApplicationStatus, Invite, InviteStatus, Project, Submission, SubmissionStatus,
};

use crate::convert;
use crate::error::{EngineError, EngineResult};

pub struct EngagementLifecycle {
    store: Arc<Store>,
}

impl EngagementLifecycle {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    // -- Invites --

    /// Brand-initiated invite; starts in `pending`. One invite per
    /// (campaign, influencer) pair regardless of status, so a declined
    /// invite blocks re-inviting the same pair.
    pub fn create_invite(&self, campaign_id: Uuid, influencer_id: Uuid) -> EngineResult<Invite> {
        self.require_campaign(campaign_id)?;
        self.require_influencer(influencer_id)?;

        let invite_id = Uuid::new_v4();
        let outcome = self.store.insert_invite(
            &invite_id.to_string(),
            &campaign_id.to_string(),
            &influencer_id.to_string(),
            InviteStatus::Pending.as_str(),
        )?;
        if outcome == InsertOutcome::Conflict {
            return Err(EngineError::Conflict(
                "influencer has already been invited to this campaign".into(),
            ));
        }

        info!(invite = %invite_id, campaign = %campaign_id, influencer = %influencer_id, "invite created");
        self.get_invite(invite_id)
    }

    /// One-shot decision on a pending invite; there is no path back to
    /// `pending` from either outcome.
    pub fn respond_invite(&self, invite_id: Uuid, decision: InviteDecision) -> EngineResult<Invite> {
        let row = self
            .store
            .get_invite(&invite_id.to_string())?
            .ok_or_else(|| EngineError::not_found("invite", invite_id))?;

        if convert::invite_status(&row.status)? != InviteStatus::Pending {
            return Err(EngineError::InvalidTransition(format!(
                "invite is {}, only a pending invite can be responded to",
                row.status
            )));
        }

        let next = match decision {
            InviteDecision::Accepted => InviteStatus::Accepted,
            InviteDecision::Declined => InviteStatus::Declined,
        };
        self.store
            .update_invite_status(&invite_id.to_string(), next.as_str())?;

        info!(invite = %invite_id, status = next.as_str(), "invite responded");
        self.get_invite(invite_id)
    }

    pub fn get_invite(&self, invite_id: Uuid) -> EngineResult<Invite> {
        let row = self
            .store
            .get_invite(&invite_id.to_string())?
            .ok_or_else(|| EngineError::not_found("invite", invite_id))?;
        let submission_id = self
            .latest_submission(&row.id)?
            .map(|s| s.id);
        convert::invite(&row, submission_id)
    }

    // -- Applications --

    /// Influencer-initiated application against a public campaign. A
    /// duplicate for the pair is a conflict signal, not a fatal error.
    pub fn submit_application(
        &self,
        campaign_id: Uuid,
        influencer_id: Uuid,
    ) -> EngineResult<Application> {
        let campaign = self.require_campaign(campaign_id)?;
        self.require_influencer(influencer_id)?;

        if !campaign.is_public {
            return Err(EngineError::Validation(
                "campaign is not open for applications".into(),
            ));
        }

        let application_id = Uuid::new_v4();
        let outcome = self.store.insert_application(
            &application_id.to_string(),
            &campaign_id.to_string(),
            &influencer_id.to_string(),
        )?;
        if outcome == InsertOutcome::Conflict {
            return Err(EngineError::Conflict(
                "influencer has already applied to this campaign".into(),
            ));
        }

        info!(application = %application_id, campaign = %campaign_id, influencer = %influencer_id, "application submitted");
        self.get_application(application_id)
    }

    /// Review a pending application. Approval atomically materializes the
    /// pair's invite directly in `accepted` (an approved application is an
    /// implicit acceptance); if an invite already exists for the pair, it is
    /// reused and moved to `accepted` rather than duplicated.
    pub fn review_application(
        &self,
        application_id: Uuid,
        decision: ApplicationDecision,
    ) -> EngineResult<(Application, Option<Invite>)> {
        let row = self
            .store
            .get_application(&application_id.to_string())?
            .ok_or_else(|| EngineError::not_found("application", application_id))?;

        if convert::application_status(&row.status)? != ApplicationStatus::Pending {
            return Err(EngineError::InvalidTransition(format!(
                "application is {}, only a pending application can be reviewed",
                row.status
            )));
        }

        match decision {
            ApplicationDecision::Rejected => {
                self.store.reject_application(&application_id.to_string())?;
                info!(application = %application_id, "application rejected");
                Ok((self.get_application(application_id)?, None))
            }
            ApplicationDecision::Approved => {
                let invite_id = Uuid::new_v4();
                let invite_row = self
                    .store
                    .approve_application(&application_id.to_string(), &invite_id.to_string())?;
                info!(
                    application = %application_id,
                    invite = %invite_row.id,
                    "application approved, invite accepted"
                );
                let invite_id: Uuid = invite_row.id.parse().map_err(anyhow::Error::from)?;
                let invite = self.get_invite(invite_id)?;
                Ok((self.get_application(application_id)?, Some(invite)))
            }
        }
    }

    pub fn get_application(&self, application_id: Uuid) -> EngineResult<Application> {
        let row = self
            .store
            .get_application(&application_id.to_string())?
            .ok_or_else(|| EngineError::not_found("application", application_id))?;
        convert::application(&row)
    }

    // -- Submissions --

    /// Deliver content against an accepted invite. Only one unresolved
    /// submission may exist per invite: `pending_review` blocks until
    /// reviewed, `approved` is terminal, and only `revision_requested`
    /// reopens the slot for a resubmission.
    pub fn submit_content(&self, invite_id: Uuid, content_url: &str) -> EngineResult<Submission> {
        let url = content_url.trim();
        if url.is_empty() {
            return Err(EngineError::Validation("content URL must not be empty".into()));
        }

        let invite_row = self
            .store
            .get_invite(&invite_id.to_string())?
            .ok_or_else(|| EngineError::not_found("invite", invite_id))?;

        if convert::invite_status(&invite_row.status)? != InviteStatus::Accepted {
            return Err(EngineError::InvalidTransition(format!(
                "invite is {}, content can only be submitted against an accepted invite",
                invite_row.status
            )));
        }

        for existing in self.store.list_submissions_for_invite(&invite_row.id)? {
            match convert::submission_status(&existing.status)? {
                SubmissionStatus::PendingReview => {
                    return Err(EngineError::InvalidTransition(
                        "a submission is already pending review for this invite".into(),
                    ));
                }
                SubmissionStatus::Approved => {
                    return Err(EngineError::InvalidTransition(
                        "an approved submission already exists for this invite".into(),
                    ));
                }
                SubmissionStatus::RevisionRequested => {}
            }
        }

        let submission_id = Uuid::new_v4();
        self.store
            .insert_submission(&submission_id.to_string(), &invite_row.id, url)?;

        info!(submission = %submission_id, invite = %invite_id, "content submitted");
        self.get_submission(submission_id)
    }

    /// Review a submission pending review: approve (terminal) or request a
    /// revision (reopens the invite for a resubmission).
    pub fn review_submission(
        &self,
        submission_id: Uuid,
        decision: SubmissionDecision,
    ) -> EngineResult<Submission> {
        let row = self
            .store
            .get_submission(&submission_id.to_string())?
            .ok_or_else(|| EngineError::not_found("submission", submission_id))?;

        if convert::submission_status(&row.status)? != SubmissionStatus::PendingReview {
            return Err(EngineError::InvalidTransition(format!(
                "submission is {}, only a submission pending review can be reviewed",
                row.status
            )));
        }

        let next = match decision {
            SubmissionDecision::Approved => SubmissionStatus::Approved,
            SubmissionDecision::RevisionRequested => SubmissionStatus::RevisionRequested,
        };
        self.store
            .update_submission_status(&submission_id.to_string(), next.as_str())?;

        info!(submission = %submission_id, status = next.as_str(), "submission reviewed");
        self.get_submission(submission_id)
    }

    pub fn get_submission(&self, submission_id: Uuid) -> EngineResult<Submission> {
        let row = self
            .store
            .get_submission(&submission_id.to_string())?
            .ok_or_else(|| EngineError::not_found("submission", submission_id))?;
        convert::submission(&row)
    }

    // -- Project projection --

    /// The influencer's merged view of their engagements: one row per
    /// invite (any status) and one row per application whose pair has no
    /// invite yet. An approved application is represented only by its
    /// resulting invite, and a pending application alongside a brand invite
    /// collapses into the invite row, so a campaign never appears twice.
    /// Pure read; never writes.
    pub fn list_projects(&self, influencer_id: Uuid) -> EngineResult<Vec<Project>> {
        self.require_influencer(influencer_id)?;
        let influencer_key = influencer_id.to_string();

        let mut projects = Vec::new();

        for invite_row in self.store.list_invites_for_influencer(&influencer_key)? {
            let campaign_row = self
                .store
                .get_campaign(&invite_row.campaign_id)?
                .ok_or_else(|| {
                    anyhow::anyhow!("invite {} references missing campaign", invite_row.id)
                })?;
            let campaign = convert::campaign(&campaign_row)?;

            let submission_status = match self.latest_submission(&invite_row.id)? {
                Some(sub) => Some(sub.status),
                None => None,
            };

            projects.push(Project::Invitation {
                invite_id: invite_row.id.parse().map_err(anyhow::Error::from)?,
                campaign_id: campaign.id,
                campaign_name: campaign.name,
                campaign_brief: campaign.brief,
                budget: campaign.budget,
                status: convert::invite_status(&invite_row.status)?,
                submission_status,
            });
        }

        for app_row in self.store.list_applications_for_influencer(&influencer_key)? {
            let status = convert::application_status(&app_row.status)?;
            if status == ApplicationStatus::Approved {
                continue;
            }
            // The invite row already covers this campaign.
            if self
                .store
                .get_invite_by_pair(&app_row.campaign_id, &influencer_key)?
                .is_some()
            {
                continue;
            }

            let campaign_row = self
                .store
                .get_campaign(&app_row.campaign_id)?
                .ok_or_else(|| {
                    anyhow::anyhow!("application {} references missing campaign", app_row.id)
                })?;
            let campaign = convert::campaign(&campaign_row)?;

            projects.push(Project::Application {
                application_id: app_row.id.parse().map_err(anyhow::Error::from)?,
                campaign_id: campaign.id,
                campaign_name: campaign.name,
                campaign_brief: campaign.brief,
                budget: campaign.budget,
                status,
            });
        }

        Ok(projects)
    }

    // -- Brand-side views --

    /// Every invite on a campaign, enriched with the influencer and the
    /// latest submission. Read-only; backs the brand's campaign detail page.
    pub fn list_campaign_invites(&self, campaign_id: Uuid) -> EngineResult<Vec<CampaignInviteRow>> {
        self.require_campaign(campaign_id)?;

        let mut rows = Vec::new();
        for invite_row in self.store.list_invites_for_campaign(&campaign_id.to_string())? {
            let inf_row = self
                .store
                .get_influencer(&invite_row.influencer_id)?
                .ok_or_else(|| {
                    anyhow::anyhow!("invite {} references missing influencer", invite_row.id)
                })?;
            let submission = self.latest_submission(&invite_row.id)?;

            rows.push(CampaignInviteRow {
                invite_id: invite_row.id.parse().map_err(anyhow::Error::from)?,
                status: convert::invite_status(&invite_row.status)?,
                influencer: convert::influencer(&inf_row)?,
                submission_id: submission.as_ref().map(|s| s.id),
                submission_url: submission.as_ref().map(|s| s.content_url.clone()),
                submission_status: submission.as_ref().map(|s| s.status),
            });
        }
        Ok(rows)
    }

    /// The review queue for a campaign: all applications with their
    /// influencer profiles.
    pub fn list_campaign_applications(
        &self,
        campaign_id: Uuid,
    ) -> EngineResult<Vec<ApplicationRow>> {
        self.require_campaign(campaign_id)?;

        let mut rows = Vec::new();
        for app_row in self.store.list_applications_for_campaign(&campaign_id.to_string())? {
            let inf_row = self
                .store
                .get_influencer(&app_row.influencer_id)?
                .ok_or_else(|| {
                    anyhow::anyhow!("application {} references missing influencer", app_row.id)
                })?;

            rows.push(ApplicationRow {
                application_id: app_row.id.parse().map_err(anyhow::Error::from)?,
                status: convert::application_status(&app_row.status)?,
                influencer: convert::influencer(&inf_row)?,
            });
        }
        Ok(rows)
    }

    // -- Shared lookups --

    /// Latest submission for an invite as a domain model, if any.
    pub fn latest_submission(&self, invite_id: &str) -> EngineResult<Option<Submission>> {
        let rows = self.store.list_submissions_for_invite(invite_id)?;
        match rows.first() {
            Some(row) => Ok(Some(convert::submission(row)?)),
            None => Ok(None),
        }
    }

    fn require_campaign(&self, campaign_id: Uuid) -> EngineResult<reach_types::models::Campaign> {
        let row = self
            .store
            .get_campaign(&campaign_id.to_string())?
            .ok_or_else(|| EngineError::not_found("campaign", campaign_id))?;
        convert::campaign(&row)
    }

    fn require_influencer(&self, influencer_id: Uuid) -> EngineResult<()> {
        self.store
            .get_influencer(&influencer_id.to_string())?
            .ok_or_else(|| EngineError::not_found("influencer", influencer_id))?;
        Ok(())
    }
}
