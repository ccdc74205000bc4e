//! Typed reads and profile maintenance over the entity store. The HTTP
//! boundary consumes these instead of raw rows so id/status parsing stays in
//! one place.

use uuid::Uuid;

use reach_db::Store;
use reach_db::queries::InsertOutcome;
use reach_types::api::UpdateProfileRequest;
use reach_types::models::{Campaign, Influencer, Niche};

use crate::convert;
use crate::error::{EngineError, EngineResult};

pub fn influencer(store: &Store, id: Uuid) -> EngineResult<Influencer> {
    let row = store
        .get_influencer(&id.to_string())?
        .ok_or_else(|| EngineError::not_found("influencer", id))?;
    convert::influencer(&row)
}

pub fn campaign(store: &Store, id: Uuid) -> EngineResult<Campaign> {
    let row = store
        .get_campaign(&id.to_string())?
        .ok_or_else(|| EngineError::not_found("campaign", id))?;
    convert::campaign(&row)
}

pub fn campaigns_for_brand(store: &Store, brand_id: Uuid) -> EngineResult<Vec<Campaign>> {
    store
        .list_campaigns_for_brand(&brand_id.to_string())?
        .iter()
        .map(convert::campaign)
        .collect()
}

pub fn public_campaigns(store: &Store) -> EngineResult<Vec<Campaign>> {
    store
        .list_public_campaigns()?
        .iter()
        .map(convert::campaign)
        .collect()
}

/// Apply a partial profile update, leaving absent fields untouched. The
/// stored keyword set is replaced wholesale when supplied.
pub fn update_influencer_profile(
    store: &Store,
    id: Uuid,
    update: &UpdateProfileRequest,
) -> EngineResult<Influencer> {
    let current = influencer(store, id)?;

    let niche = match update.niche.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => Some(
            s.parse::<Niche>()
                .map_err(|e| EngineError::Validation(e.to_string()))?,
        ),
        Some(_) => None,
        None => current.niche,
    };

    let name = update.name.clone().unwrap_or(current.name);
    let location = update.location.clone().unwrap_or(current.location);
    let keywords = update.keywords.clone().unwrap_or(current.keywords);
    let followers = update.followers.unwrap_or(current.followers);

    store.update_influencer_profile(
        &id.to_string(),
        &name,
        &location,
        &keywords.join(", "),
        niche.map(|n| n.as_str()),
        followers.min(i64::MAX as u64) as i64,
        update.engagement_rate.or(current.engagement_rate),
        update
            .audience_age_range
            .as_deref()
            .or(current.audience_age_range.as_deref()),
        update
            .audience_gender_split
            .as_deref()
            .or(current.audience_gender_split.as_deref()),
    )?;

    influencer(store, id)
}

/// Map a UNIQUE-violation insert outcome to the conflict error used for
/// duplicate registrations.
pub fn registration_outcome(outcome: InsertOutcome) -> EngineResult<()> {
    match outcome {
        InsertOutcome::Inserted => Ok(()),
        InsertOutcome::Conflict => Err(EngineError::Conflict(
            "an account with this email already exists".into(),
        )),
    }
}
