#![allow(dead_code)] // not every test binary uses every helper

use std::sync::Arc;

use uuid::Uuid;

use reach_db::Store;
use reach_engine::{EngagementLifecycle, MatchingEngine};

pub struct TestEnv {
    pub store: Arc<Store>,
    pub matching: MatchingEngine,
    pub lifecycle: EngagementLifecycle,
    pub brand_id: Uuid,
}

impl TestEnv {
    pub fn new() -> Self {
        let store = Arc::new(Store::open_in_memory().expect("in-memory store"));
        let brand_id = Uuid::new_v4();
        store
            .create_brand(&brand_id.to_string(), "brand@test.com", "hash")
            .expect("seed brand");

        Self {
            matching: MatchingEngine::new(store.clone()),
            lifecycle: EngagementLifecycle::new(store.clone()),
            store,
            brand_id,
        }
    }

    pub fn seed_influencer(&self, name: &str, location: &str, keywords: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.store
            .create_influencer(
                &id.to_string(),
                &format!("{}@test.com", name.to_lowercase()),
                "hash",
                name,
                location,
                keywords,
            )
            .expect("seed influencer");
        id
    }

    pub fn seed_influencer_full(
        &self,
        name: &str,
        location: &str,
        keywords: &str,
        niche: Option<&str>,
        followers: i64,
    ) -> Uuid {
        let id = self.seed_influencer(name, location, keywords);
        self.store
            .update_influencer_profile(
                &id.to_string(),
                name,
                location,
                keywords,
                niche,
                followers,
                None,
                None,
                None,
            )
            .expect("update influencer");
        id
    }

    pub fn seed_campaign(&self, name: &str, brief: &str, is_public: bool) -> Uuid {
        self.seed_campaign_at(name, brief, is_public, None)
    }

    pub fn seed_campaign_at(
        &self,
        name: &str,
        brief: &str,
        is_public: bool,
        target_location: Option<&str>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.store
            .create_campaign(
                &id.to_string(),
                &self.brand_id.to_string(),
                name,
                None,
                None,
                target_location,
                500.0,
                brief,
                is_public,
            )
            .expect("seed campaign");
        id
    }
}
