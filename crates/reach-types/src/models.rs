use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The primary content category an influencer identifies with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Niche {
    #[serde(rename = "Food & Drink")]
    FoodAndDrink,
    #[serde(rename = "Health & Fitness")]
    HealthAndFitness,
    #[serde(rename = "Travel")]
    Travel,
    #[serde(rename = "Fashion & Beauty")]
    FashionAndBeauty,
    #[serde(rename = "Tech & Gaming")]
    TechAndGaming,
    #[serde(rename = "Lifestyle")]
    Lifestyle,
}

impl Niche {
    pub fn as_str(&self) -> &'static str {
        match self {
            Niche::FoodAndDrink => "Food & Drink",
            Niche::HealthAndFitness => "Health & Fitness",
            Niche::Travel => "Travel",
            Niche::FashionAndBeauty => "Fashion & Beauty",
            Niche::TechAndGaming => "Tech & Gaming",
            Niche::Lifestyle => "Lifestyle",
        }
    }
}

impl std::str::FromStr for Niche {
    type Err = UnknownNiche;

    /// Case-insensitive; accepts the display form used on the wire and in
    /// the catalog filters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "food & drink" => Ok(Niche::FoodAndDrink),
            "health & fitness" => Ok(Niche::HealthAndFitness),
            "travel" => Ok(Niche::Travel),
            "fashion & beauty" => Ok(Niche::FashionAndBeauty),
            "tech & gaming" => Ok(Niche::TechAndGaming),
            "lifestyle" => Ok(Niche::Lifestyle),
            _ => Err(UnknownNiche(s.to_string())),
        }
    }
}

impl std::fmt::Display for Niche {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct UnknownNiche(pub String);

impl std::fmt::Display for UnknownNiche {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown niche: {}", self.0)
    }
}

impl std::error::Error for UnknownNiche {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: Uuid,
    pub brand_id: Uuid,
    pub name: String,
    pub goal: Option<String>,
    pub target_audience: Option<String>,
    pub target_location: Option<String>,
    pub budget: f64,
    pub brief: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Influencer {
    pub id: Uuid,
    pub name: String,
    pub niche: Option<Niche>,
    pub location: String,
    pub followers: u64,
    pub engagement_rate: Option<f64>,
    pub audience_age_range: Option<String>,
    pub audience_gender_split: Option<String>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InviteStatus {
    Pending,
    Accepted,
    Declined,
}

impl InviteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InviteStatus::Pending => "pending",
            InviteStatus::Accepted => "accepted",
            InviteStatus::Declined => "declined",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invite {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub influencer_id: Uuid,
    pub status: InviteStatus,
    /// Latest submission for this invite, if any. Derived at read time.
    pub submission_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub influencer_id: Uuid,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    PendingReview,
    Approved,
    RevisionRequested,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::PendingReview => "pending_review",
            SubmissionStatus::Approved => "approved",
            SubmissionStatus::RevisionRequested => "revision_requested",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub invite_id: Uuid,
    pub content_url: String,
    pub status: SubmissionStatus,
    pub created_at: DateTime<Utc>,
}

/// One row of the influencer-facing project list. A project is either a
/// brand-initiated invitation or the influencer's own application to a
/// public campaign; an application that has been approved is represented
/// only by its resulting invite.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Project {
    Invitation {
        invite_id: Uuid,
        campaign_id: Uuid,
        campaign_name: String,
        campaign_brief: String,
        budget: f64,
        status: InviteStatus,
        submission_status: Option<SubmissionStatus>,
    },
    Application {
        application_id: Uuid,
        campaign_id: Uuid,
        campaign_name: String,
        campaign_brief: String,
        budget: f64,
        status: ApplicationStatus,
    },
}
