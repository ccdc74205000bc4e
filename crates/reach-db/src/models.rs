/// Database row types — these map directly to SQLite rows.
/// Distinct from the reach-types API models to keep the DB layer independent.

pub struct BrandRow {
    pub id: String,
    pub email: String,
    pub password: String,
    pub created_at: String,
}

pub struct InfluencerRow {
    pub id: String,
    pub email: String,
    pub password: String,
    pub name: String,
    pub niche: Option<String>,
    pub location: String,
    pub followers: i64,
    pub engagement_rate: Option<f64>,
    pub audience_age_range: Option<String>,
    pub audience_gender_split: Option<String>,
    pub keywords: String,
}

pub struct CampaignRow {
    pub id: String,
    pub brand_id: String,
    pub name: String,
    pub goal: Option<String>,
    pub target_audience: Option<String>,
    pub target_location: Option<String>,
    pub budget: f64,
    pub brief: String,
    pub is_public: bool,
    pub created_at: String,
}

pub struct InviteRow {
    pub id: String,
    pub campaign_id: String,
    pub influencer_id: String,
    pub status: String,
    pub created_at: String,
}

pub struct ApplicationRow {
    pub id: String,
    pub campaign_id: String,
    pub influencer_id: String,
    pub status: String,
    pub created_at: String,
}

pub struct SubmissionRow {
    pub id: String,
    pub invite_id: String,
    pub content_url: String,
    pub status: String,
    pub created_at: String,
}
