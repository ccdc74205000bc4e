mod common;

use common::TestEnv;
use reach_engine::EngineError;
use reach_types::api::{ApplicationDecision, InviteDecision, SubmissionDecision};
use reach_types::models::{ApplicationStatus, InviteStatus, Project, SubmissionStatus};
use uuid::Uuid;

// -- Invites --

#[test]
fn create_invite_starts_pending() {
    let env = TestEnv::new();
    let influencer = env.seed_influencer("Inf", "Austin", "coffee");
    let campaign = env.seed_campaign("C", "brief", false);

    let invite = env
        .lifecycle
        .create_invite(campaign, influencer)
        .expect("create invite");
    assert_eq!(invite.status, InviteStatus::Pending);
    assert_eq!(invite.campaign_id, campaign);
    assert_eq!(invite.influencer_id, influencer);
    assert!(invite.submission_id.is_none());
}

#[test]
fn duplicate_invite_is_conflict_and_original_is_unchanged() {
    let env = TestEnv::new();
    let influencer = env.seed_influencer("Inf", "Austin", "coffee");
    let campaign = env.seed_campaign("C", "brief", false);

    let original = env
        .lifecycle
        .create_invite(campaign, influencer)
        .expect("first invite");
    let err = env.lifecycle.create_invite(campaign, influencer).unwrap_err();
    assert!(matches!(err, EngineError::Conflict(_)));

    let still = env.lifecycle.get_invite(original.id).expect("fetch");
    assert_eq!(still.id, original.id);
    assert_eq!(still.status, InviteStatus::Pending);
}

#[test]
fn invite_for_missing_entities_is_not_found() {
    let env = TestEnv::new();
    let influencer = env.seed_influencer("Inf", "Austin", "coffee");
    let campaign = env.seed_campaign("C", "brief", false);

    let err = env.lifecycle.create_invite(Uuid::new_v4(), influencer).unwrap_err();
    assert!(matches!(err, EngineError::NotFound { .. }));
    let err = env.lifecycle.create_invite(campaign, Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, EngineError::NotFound { .. }));
}

#[test]
fn respond_invite_is_one_shot() {
    let env = TestEnv::new();
    let influencer = env.seed_influencer("Inf", "Austin", "coffee");
    let campaign = env.seed_campaign("C", "brief", false);
    let invite = env
        .lifecycle
        .create_invite(campaign, influencer)
        .expect("invite");

    let accepted = env
        .lifecycle
        .respond_invite(invite.id, InviteDecision::Accepted)
        .expect("accept");
    assert_eq!(accepted.status, InviteStatus::Accepted);

    // A second decision on the same invite is rejected, state untouched.
    let err = env
        .lifecycle
        .respond_invite(invite.id, InviteDecision::Declined)
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidTransition(_)));
    let still = env.lifecycle.get_invite(invite.id).expect("fetch");
    assert_eq!(still.status, InviteStatus::Accepted);
}

#[test]
fn declined_invite_blocks_reinvite() {
    let env = TestEnv::new();
    let influencer = env.seed_influencer("Inf", "Austin", "coffee");
    let campaign = env.seed_campaign("C", "brief", false);
    let invite = env
        .lifecycle
        .create_invite(campaign, influencer)
        .expect("invite");
    env.lifecycle
        .respond_invite(invite.id, InviteDecision::Declined)
        .expect("decline");

    let err = env.lifecycle.create_invite(campaign, influencer).unwrap_err();
    assert!(matches!(err, EngineError::Conflict(_)));
}

// -- Applications --

#[test]
fn application_requires_public_campaign() {
    let env = TestEnv::new();
    let influencer = env.seed_influencer("Inf", "Austin", "coffee");
    let private = env.seed_campaign("Private", "brief", false);

    let err = env
        .lifecycle
        .submit_application(private, influencer)
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
}

#[test]
fn duplicate_application_is_conflict_with_single_pending_row() {
    let env = TestEnv::new();
    let influencer = env.seed_influencer("Inf", "Austin", "coffee");
    let campaign = env.seed_campaign("Public", "brief", true);

    let first = env
        .lifecycle
        .submit_application(campaign, influencer)
        .expect("apply");
    let err = env
        .lifecycle
        .submit_application(campaign, influencer)
        .unwrap_err();
    assert!(matches!(err, EngineError::Conflict(_)));

    let rows = env
        .store
        .list_applications_for_influencer(&influencer.to_string())
        .expect("list");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, first.id.to_string());
    assert_eq!(rows[0].status, "pending");
}

#[test]
fn approving_application_creates_exactly_one_accepted_invite() {
    let env = TestEnv::new();
    let influencer = env.seed_influencer("Inf", "Austin", "coffee");
    let campaign = env.seed_campaign("Public", "brief", true);
    let application = env
        .lifecycle
        .submit_application(campaign, influencer)
        .expect("apply");

    let (reviewed, invite) = env
        .lifecycle
        .review_application(application.id, ApplicationDecision::Approved)
        .expect("approve");
    assert_eq!(reviewed.status, ApplicationStatus::Approved);

    let invite = invite.expect("approval must yield an invite");
    assert_eq!(invite.status, InviteStatus::Accepted);
    assert_eq!(invite.campaign_id, campaign);
    assert_eq!(invite.influencer_id, influencer);

    let invites = env
        .store
        .list_invites_for_influencer(&influencer.to_string())
        .expect("list invites");
    assert_eq!(invites.len(), 1);
}

#[test]
fn approving_reuses_existing_invite_for_the_pair() {
    let env = TestEnv::new();
    let influencer = env.seed_influencer("Inf", "Austin", "coffee");
    let campaign = env.seed_campaign("Public", "brief", true);

    let direct = env
        .lifecycle
        .create_invite(campaign, influencer)
        .expect("brand invite");
    let application = env
        .lifecycle
        .submit_application(campaign, influencer)
        .expect("apply");

    let (_, invite) = env
        .lifecycle
        .review_application(application.id, ApplicationDecision::Approved)
        .expect("approve");
    let invite = invite.expect("invite");
    assert_eq!(invite.id, direct.id);
    assert_eq!(invite.status, InviteStatus::Accepted);

    let invites = env
        .store
        .list_invites_for_influencer(&influencer.to_string())
        .expect("list invites");
    assert_eq!(invites.len(), 1);
    assert_eq!(invites[0].status, "accepted", "pending invite moved to accepted");
}

#[test]
fn reviewing_twice_is_invalid_and_does_not_duplicate_invites() {
    let env = TestEnv::new();
    let influencer = env.seed_influencer("Inf", "Austin", "coffee");
    let campaign = env.seed_campaign("Public", "brief", true);
    let application = env
        .lifecycle
        .submit_application(campaign, influencer)
        .expect("apply");

    env.lifecycle
        .review_application(application.id, ApplicationDecision::Approved)
        .expect("approve");
    let err = env
        .lifecycle
        .review_application(application.id, ApplicationDecision::Approved)
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidTransition(_)));

    let invites = env
        .store
        .list_invites_for_influencer(&influencer.to_string())
        .expect("list invites");
    assert_eq!(invites.len(), 1);
}

#[test]
fn rejected_application_creates_no_invite() {
    let env = TestEnv::new();
    let influencer = env.seed_influencer("Inf", "Austin", "coffee");
    let campaign = env.seed_campaign("Public", "brief", true);
    let application = env
        .lifecycle
        .submit_application(campaign, influencer)
        .expect("apply");

    let (reviewed, invite) = env
        .lifecycle
        .review_application(application.id, ApplicationDecision::Rejected)
        .expect("reject");
    assert_eq!(reviewed.status, ApplicationStatus::Rejected);
    assert!(invite.is_none());

    let invites = env
        .store
        .list_invites_for_influencer(&influencer.to_string())
        .expect("list invites");
    assert!(invites.is_empty());
}

// -- Submissions --

fn accepted_invite(env: &TestEnv) -> (Uuid, Uuid, Uuid) {
    let influencer = env.seed_influencer("Inf", "Austin", "coffee");
    let campaign = env.seed_campaign("C", "brief", false);
    let invite = env
        .lifecycle
        .create_invite(campaign, influencer)
        .expect("invite");
    env.lifecycle
        .respond_invite(invite.id, InviteDecision::Accepted)
        .expect("accept");
    (campaign, influencer, invite.id)
}

#[test]
fn submit_content_requires_accepted_invite() {
    let env = TestEnv::new();
    let influencer = env.seed_influencer("Inf", "Austin", "coffee");
    let campaign = env.seed_campaign("C", "brief", false);
    let invite = env
        .lifecycle
        .create_invite(campaign, influencer)
        .expect("invite");

    let err = env
        .lifecycle
        .submit_content(invite.id, "https://example.com/post")
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidTransition(_)));

    let rows = env
        .store
        .list_submissions_for_invite(&invite.id.to_string())
        .expect("list");
    assert!(rows.is_empty(), "no submission row may be created");
}

#[test]
fn submit_content_happy_path() {
    let env = TestEnv::new();
    let (_, _, invite_id) = accepted_invite(&env);

    let submission = env
        .lifecycle
        .submit_content(invite_id, "https://example.com/post")
        .expect("submit");
    assert_eq!(submission.status, SubmissionStatus::PendingReview);
    assert_eq!(submission.invite_id, invite_id);

    let invite = env.lifecycle.get_invite(invite_id).expect("fetch");
    assert_eq!(invite.submission_id, Some(submission.id));
}

#[test]
fn open_submission_blocks_a_second_one() {
    let env = TestEnv::new();
    let (_, _, invite_id) = accepted_invite(&env);
    env.lifecycle
        .submit_content(invite_id, "https://example.com/v1")
        .expect("submit");

    let err = env
        .lifecycle
        .submit_content(invite_id, "https://example.com/v2")
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidTransition(_)));
}

#[test]
fn revision_request_reopens_for_resubmission() {
    let env = TestEnv::new();
    let (_, _, invite_id) = accepted_invite(&env);
    let first = env
        .lifecycle
        .submit_content(invite_id, "https://example.com/v1")
        .expect("submit");

    let reviewed = env
        .lifecycle
        .review_submission(first.id, SubmissionDecision::RevisionRequested)
        .expect("review");
    assert_eq!(reviewed.status, SubmissionStatus::RevisionRequested);

    let second = env
        .lifecycle
        .submit_content(invite_id, "https://example.com/v2")
        .expect("resubmit");
    assert_eq!(second.status, SubmissionStatus::PendingReview);
    assert_ne!(second.id, first.id);
}

#[test]
fn approved_submission_is_terminal() {
    let env = TestEnv::new();
    let (_, _, invite_id) = accepted_invite(&env);
    let submission = env
        .lifecycle
        .submit_content(invite_id, "https://example.com/v1")
        .expect("submit");
    env.lifecycle
        .review_submission(submission.id, SubmissionDecision::Approved)
        .expect("approve");

    // No re-review and no further submissions against this invite.
    let err = env
        .lifecycle
        .review_submission(submission.id, SubmissionDecision::RevisionRequested)
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidTransition(_)));
    let err = env
        .lifecycle
        .submit_content(invite_id, "https://example.com/v2")
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidTransition(_)));
}

#[test]
fn empty_content_url_is_rejected() {
    let env = TestEnv::new();
    let (_, _, invite_id) = accepted_invite(&env);

    let err = env.lifecycle.submit_content(invite_id, "   ").unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
}

// -- Project projection --

#[test]
fn projects_merge_invites_and_open_applications() {
    let env = TestEnv::new();
    let influencer = env.seed_influencer("Inf", "Austin", "coffee");
    let invited_campaign = env.seed_campaign("Invited", "brief one", false);
    let applied_campaign = env.seed_campaign("Applied", "brief two", true);

    env.lifecycle
        .create_invite(invited_campaign, influencer)
        .expect("invite");
    env.lifecycle
        .submit_application(applied_campaign, influencer)
        .expect("apply");

    let projects = env.lifecycle.list_projects(influencer).expect("projects");
    assert_eq!(projects.len(), 2);
    assert!(projects.iter().any(|p| matches!(
        p,
        Project::Invitation { campaign_id, .. } if *campaign_id == invited_campaign
    )));
    assert!(projects.iter().any(|p| matches!(
        p,
        Project::Application { campaign_id, .. } if *campaign_id == applied_campaign
    )));
}

#[test]
fn approved_application_appears_only_as_its_invite() {
    let env = TestEnv::new();
    let influencer = env.seed_influencer("Inf", "Austin", "coffee");
    let campaign = env.seed_campaign("Public", "brief", true);

    let application = env
        .lifecycle
        .submit_application(campaign, influencer)
        .expect("apply");
    env.lifecycle
        .review_application(application.id, ApplicationDecision::Approved)
        .expect("approve");

    let projects = env.lifecycle.list_projects(influencer).expect("projects");
    assert_eq!(projects.len(), 1, "no duplicate row for the same campaign");
    match &projects[0] {
        Project::Invitation { status, campaign_id, .. } => {
            assert_eq!(*status, InviteStatus::Accepted);
            assert_eq!(*campaign_id, campaign);
        }
        other => panic!("expected an invitation project, got {:?}", other),
    }
}

#[test]
fn projects_carry_submission_status() {
    let env = TestEnv::new();
    let (_, influencer, invite_id) = accepted_invite(&env);
    env.lifecycle
        .submit_content(invite_id, "https://example.com/post")
        .expect("submit");

    let projects = env.lifecycle.list_projects(influencer).expect("projects");
    assert_eq!(projects.len(), 1);
    match &projects[0] {
        Project::Invitation { submission_status, .. } => {
            assert_eq!(*submission_status, Some(SubmissionStatus::PendingReview));
        }
        other => panic!("expected an invitation project, got {:?}", other),
    }
}

#[test]
fn pending_application_alongside_invite_shows_one_row() {
    let env = TestEnv::new();
    let influencer = env.seed_influencer("Inf", "Austin", "coffee");
    let campaign = env.seed_campaign("Public", "brief", true);

    env.lifecycle
        .submit_application(campaign, influencer)
        .expect("apply");
    env.lifecycle
        .create_invite(campaign, influencer)
        .expect("invite");

    let projects = env.lifecycle.list_projects(influencer).expect("projects");
    assert_eq!(projects.len(), 1, "one row per campaign");
    assert!(matches!(
        &projects[0],
        Project::Invitation { campaign_id, .. } if *campaign_id == campaign
    ));
}

#[test]
fn rejected_application_still_shows_in_projects() {
    let env = TestEnv::new();
    let influencer = env.seed_influencer("Inf", "Austin", "coffee");
    let campaign = env.seed_campaign("Public", "brief", true);
    let application = env
        .lifecycle
        .submit_application(campaign, influencer)
        .expect("apply");
    env.lifecycle
        .review_application(application.id, ApplicationDecision::Rejected)
        .expect("reject");

    let projects = env.lifecycle.list_projects(influencer).expect("projects");
    assert_eq!(projects.len(), 1);
    assert!(matches!(
        &projects[0],
        Project::Application { status: ApplicationStatus::Rejected, .. }
    ));
}

#[test]
fn projects_for_unknown_influencer_is_not_found() {
    let env = TestEnv::new();
    let err = env.lifecycle.list_projects(Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, EngineError::NotFound { .. }));
}
