mod common;

use common::TestEnv;
use reach_engine::EngineError;
use reach_types::api::SearchQuery;
use uuid::Uuid;

#[test]
fn rank_orders_by_overlap_and_excludes_zero_overlap() {
    let env = TestEnv::new();
    let a = env.seed_influencer("InfluencerA", "Austin", "coffee, tacos");
    let b = env.seed_influencer("InfluencerB", "Austin", "coffee, outdoor, hiking");
    let _c = env.seed_influencer("InfluencerC", "Austin", "gaming");

    let campaign = env.seed_campaign("Artisan Coffee", "artisan coffee outdoor", false);

    let matches = env.matching.rank(campaign).expect("rank");
    assert_eq!(matches.len(), 2, "zero-overlap influencer must be excluded");
    assert_eq!(matches[0].influencer.id, b);
    assert_eq!(matches[1].influencer.id, a);
    assert!(matches[0].match_score > matches[1].match_score);
}

#[test]
fn rank_is_deterministic_across_calls() {
    let env = TestEnv::new();
    for i in 0..6 {
        env.seed_influencer(&format!("Inf{}", i), "Austin", "coffee, food, travel");
    }
    let campaign = env.seed_campaign("Coffee push", "coffee and food in austin", false);

    let first = env.matching.rank(campaign).expect("rank");
    for _ in 0..3 {
        let again = env.matching.rank(campaign).expect("rank");
        let ids: Vec<_> = again.iter().map(|m| m.influencer.id).collect();
        let first_ids: Vec<_> = first.iter().map(|m| m.influencer.id).collect();
        assert_eq!(ids, first_ids);
    }
}

#[test]
fn rank_ties_break_on_ascending_id() {
    let env = TestEnv::new();
    let x = env.seed_influencer("TieX", "Austin", "coffee");
    let y = env.seed_influencer("TieY", "Austin", "coffee");
    let campaign = env.seed_campaign("Tie", "coffee", false);

    let matches = env.matching.rank(campaign).expect("rank");
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].match_score, matches[1].match_score);
    let (lo, hi) = if x < y { (x, y) } else { (y, x) };
    assert_eq!(matches[0].influencer.id, lo);
    assert_eq!(matches[1].influencer.id, hi);
}

#[test]
fn rank_adding_overlapping_keyword_never_lowers_position() {
    let env = TestEnv::new();
    let a = env.seed_influencer("MonoA", "Austin", "coffee");
    let _b = env.seed_influencer("MonoB", "Austin", "coffee, outdoor");
    let campaign = env.seed_campaign("Mono", "artisan coffee outdoor hiking", false);

    let before = env.matching.rank(campaign).expect("rank");
    let pos_before = before
        .iter()
        .position(|m| m.influencer.id == a)
        .expect("a ranked");

    // A picks up another brief keyword; its position may only improve.
    env.store
        .update_influencer_profile(
            &a.to_string(),
            "MonoA",
            "Austin",
            "coffee, hiking",
            None,
            0,
            None,
            None,
            None,
        )
        .expect("update keywords");

    let after = env.matching.rank(campaign).expect("rank");
    let pos_after = after
        .iter()
        .position(|m| m.influencer.id == a)
        .expect("a still ranked");
    assert!(pos_after <= pos_before);
}

#[test]
fn rank_niche_bonus_breaks_equal_overlap() {
    let env = TestEnv::new();
    let plain = env.seed_influencer("Plain", "Austin", "coffee");
    let niched = env.seed_influencer_full(
        "Niched",
        "Austin",
        "coffee",
        Some("Food & Drink"),
        1000,
    );
    let campaign = env.seed_campaign("Brunch", "coffee and food lovers", false);

    let matches = env.matching.rank(campaign).expect("rank");
    assert_eq!(matches[0].influencer.id, niched);
    assert_eq!(matches[1].influencer.id, plain);
    assert_eq!(matches[0].match_score, matches[1].match_score + 1);
}

#[test]
fn rank_niche_bonus_alone_never_ranks_anyone() {
    let env = TestEnv::new();
    env.seed_influencer_full("NoOverlap", "Austin", "gaming", Some("Food & Drink"), 1000);
    let campaign = env.seed_campaign("Food", "food and drink specials", false);

    let matches = env.matching.rank(campaign).expect("rank");
    assert!(matches.is_empty());
}

#[test]
fn rank_respects_campaign_target_location() {
    let env = TestEnv::new();
    let local = env.seed_influencer("Local", "Austin", "coffee");
    let _remote = env.seed_influencer("Remote", "Denver", "coffee");
    let campaign = env.seed_campaign_at("Local push", "coffee", false, Some("austin"));

    let matches = env.matching.rank(campaign).expect("rank");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].influencer.id, local);
}

#[test]
fn rank_without_target_location_considers_everyone() {
    let env = TestEnv::new();
    env.seed_influencer("Local", "Austin", "coffee");
    env.seed_influencer("Remote", "Denver", "coffee");
    let campaign = env.seed_campaign_at("Anywhere", "coffee", false, None);

    let matches = env.matching.rank(campaign).expect("rank");
    assert_eq!(matches.len(), 2);
}

#[test]
fn rank_tokenization_strips_punctuation_and_case() {
    let env = TestEnv::new();
    let a = env.seed_influencer("Punct", "Austin", "coffee");
    let campaign = env.seed_campaign("Punct", "COFFEE!! (artisan, small-batch)", false);

    let matches = env.matching.rank(campaign).expect("rank");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].influencer.id, a);
}

#[test]
fn rank_missing_campaign_is_not_found() {
    let env = TestEnv::new();
    let err = env.matching.rank(Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, EngineError::NotFound { .. }));
}

#[test]
fn search_empty_filters_return_catalog_by_followers_desc() {
    let env = TestEnv::new();
    let small = env.seed_influencer_full("Small", "Austin", "coffee", None, 500);
    let big = env.seed_influencer_full("Big", "Denver", "travel", None, 90_000);
    let mid = env.seed_influencer_full("Mid", "Austin", "food", None, 8_000);

    let results = env.matching.search(&SearchQuery::default()).expect("search");
    let ids: Vec<_> = results.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![big, mid, small]);
}

#[test]
fn search_filters_compose_as_and() {
    let env = TestEnv::new();
    let hit = env.seed_influencer_full(
        "Hit",
        "Austin",
        "food",
        Some("Food & Drink"),
        9_000,
    );
    // Matches niche but not followers
    env.seed_influencer_full("TooSmall", "Austin", "food", Some("Food & Drink"), 100);
    // Matches followers but not niche
    env.seed_influencer_full("WrongNiche", "Austin", "travel", Some("Travel"), 9_500);
    // Matches both but not location
    env.seed_influencer_full("Elsewhere", "Denver", "food", Some("Food & Drink"), 9_200);

    let query = SearchQuery {
        niche: Some("food & drink".into()),
        location: Some("aus".into()),
        min_followers: Some(1_000),
        max_followers: Some(10_000),
    };
    let results = env.matching.search(&query).expect("search");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, hit);
}

#[test]
fn search_follower_bounds_are_inclusive() {
    let env = TestEnv::new();
    let exact = env.seed_influencer_full("Exact", "Austin", "food", None, 5_000);

    let query = SearchQuery {
        min_followers: Some(5_000),
        max_followers: Some(5_000),
        ..Default::default()
    };
    let results = env.matching.search(&query).expect("search");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, exact);
}

#[test]
fn search_unknown_niche_matches_nothing() {
    let env = TestEnv::new();
    env.seed_influencer("Any", "Austin", "food");

    let query = SearchQuery {
        niche: Some("underwater basket weaving".into()),
        ..Default::default()
    };
    let results = env.matching.search(&query).expect("search");
    assert!(results.is_empty());
}

#[test]
fn search_is_side_effect_free() {
    let env = TestEnv::new();
    env.seed_influencer("Stable", "Austin", "food");

    let before = env.matching.search(&SearchQuery::default()).expect("search");
    for _ in 0..5 {
        let again = env.matching.search(&SearchQuery::default()).expect("search");
        assert_eq!(again.len(), before.len());
    }
}
