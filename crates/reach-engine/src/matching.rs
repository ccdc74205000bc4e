//! Campaign/influencer matching and catalog search.
//!
//! Ranking is a deterministic keyword-overlap score, not a learned model:
//! the brief is tokenized into a keyword set, each influencer's stored
//! keyword set is intersected with it, and zero-overlap influencers are
//! dropped entirely so an empty result means "no matches".

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use reach_db::Store;
use reach_db::models::InfluencerRow;
use reach_types::api::{RankedMatch, SearchQuery};
use reach_types::models::{Influencer, Niche};

use crate::convert;
use crate::error::{EngineError, EngineResult};

/// Each shared brief keyword is worth this much; the niche bonus is worth
/// one point, so keyword overlap always dominates the niche signal and the
/// score stays monotonic in overlap.
const KEYWORD_WEIGHT: u32 = 2;
const NICHE_BONUS: u32 = 1;

pub struct MatchingEngine {
    store: Arc<Store>,
}

impl MatchingEngine {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Rank the influencer catalog against a campaign brief.
    ///
    /// When the campaign names a target location, only influencers located
    /// there (case-insensitive) are considered; a campaign without one ranks
    /// the whole catalog. Output is ordered by score descending, then
    /// influencer id ascending, and recomputed on every call.
    pub fn rank(&self, campaign_id: Uuid) -> EngineResult<Vec<RankedMatch>> {
        let row = self
            .store
            .get_campaign(&campaign_id.to_string())?
            .ok_or_else(|| EngineError::not_found("campaign", campaign_id))?;

        let brief_keywords = tokenize(&row.brief);
        let target_location = row
            .target_location
            .as_deref()
            .map(str::trim)
            .filter(|loc| !loc.is_empty())
            .map(str::to_lowercase);

        let mut matches = Vec::new();
        for inf_row in self.store.list_influencers()? {
            if let Some(target) = &target_location {
                if inf_row.location.trim().to_lowercase() != *target {
                    continue;
                }
            }

            let influencer = convert::influencer(&inf_row)?;
            let overlap = keyword_overlap(&brief_keywords, &influencer.keywords);
            if overlap == 0 {
                continue;
            }

            let score = KEYWORD_WEIGHT * overlap + niche_bonus(&brief_keywords, influencer.niche);
            matches.push(RankedMatch {
                influencer,
                match_score: score,
            });
        }

        matches.sort_by(|a, b| {
            b.match_score
                .cmp(&a.match_score)
                .then(a.influencer.id.cmp(&b.influencer.id))
        });

        debug!(
            campaign = %campaign_id,
            candidates = matches.len(),
            "ranked influencers against brief"
        );
        Ok(matches)
    }

    /// Filtered view of the influencer catalog. All supplied filters compose
    /// as a logical AND; no filters returns the whole catalog. A niche string
    /// outside the known set matches no influencer rather than failing, so
    /// search has no caller-facing failure mode. Ordered by follower count
    /// descending, then id ascending. Read-only.
    pub fn search(&self, query: &SearchQuery) -> EngineResult<Vec<Influencer>> {
        let niche_filter = match query.niche.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => match s.parse::<Niche>() {
                Ok(niche) => Some(niche),
                Err(_) => return Ok(Vec::new()),
            },
            _ => None,
        };
        let location_filter = query
            .location
            .as_deref()
            .map(str::trim)
            .filter(|loc| !loc.is_empty())
            .map(str::to_lowercase);

        let mut results = Vec::new();
        for row in self.store.list_influencers()? {
            if !matches_followers(&row, query.min_followers, query.max_followers) {
                continue;
            }
            if let Some(loc) = &location_filter {
                if !row.location.to_lowercase().contains(loc.as_str()) {
                    continue;
                }
            }

            let influencer = convert::influencer(&row)?;
            if let Some(niche) = niche_filter {
                if influencer.niche != Some(niche) {
                    continue;
                }
            }
            results.push(influencer);
        }

        // The store already orders by (followers DESC, id ASC); filtering
        // preserves it, so the default sort holds for the empty filter set too.
        Ok(results)
    }
}

/// Lowercase, strip punctuation, split on whitespace. No stop-word list:
/// the brief author controls the text, and determinism matters more than
/// precision here.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|tok| !tok.is_empty())
        .map(str::to_string)
        .collect()
}

fn keyword_overlap(brief: &BTreeSet<String>, keywords: &[String]) -> u32 {
    let influencer_set: BTreeSet<String> = keywords.iter().map(|kw| kw.to_lowercase()).collect();
    influencer_set
        .iter()
        .filter(|kw| brief.contains(kw.as_str()))
        .count() as u32
}

/// One bonus point when any token of the influencer's niche appears in the
/// brief keyword set ("Food & Drink" matches a brief mentioning "food").
fn niche_bonus(brief: &BTreeSet<String>, niche: Option<Niche>) -> u32 {
    match niche {
        Some(n) if tokenize(n.as_str()).iter().any(|tok| brief.contains(tok)) => NICHE_BONUS,
        _ => 0,
    }
}

fn matches_followers(row: &InfluencerRow, min: Option<u64>, max: Option<u64>) -> bool {
    let followers = row.followers.max(0) as u64;
    if let Some(min) = min {
        if followers < min {
            return false;
        }
    }
    if let Some(max) = max {
        if followers > max {
            return false;
        }
    }
    true
}
