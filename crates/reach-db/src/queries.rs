use crate::Store;
use crate::models::{ApplicationRow, BrandRow, CampaignRow, InfluencerRow, InviteRow, SubmissionRow};
use anyhow::Result;

/// Outcome of an insert guarded by a UNIQUE constraint. `Conflict` means the
/// row already existed; the original row is untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    Conflict,
}

impl Store {
    // -- Brands --

    pub fn create_brand(&self, id: &str, email: &str, password_hash: &str) -> Result<InsertOutcome> {
        self.with_conn_mut(|conn| {
            let res = conn.execute(
                "INSERT INTO brands (id, email, password) VALUES (?1, ?2, ?3)",
                (id, email, password_hash),
            );
            map_unique(res)
        })
    }

    pub fn get_brand_by_email(&self, email: &str) -> Result<Option<BrandRow>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, email, password, created_at FROM brands WHERE email = ?1")?;
            stmt.query_row([email], |row| {
                Ok(BrandRow {
                    id: row.get(0)?,
                    email: row.get(1)?,
                    password: row.get(2)?,
                    created_at: row.get(3)?,
                })
            })
            .optional()
        })
    }

    // -- Influencers --

    pub fn create_influencer(
        &self,
        id: &str,
        email: &str,
        password_hash: &str,
        name: &str,
        location: &str,
        keywords: &str,
    ) -> Result<InsertOutcome> {
        self.with_conn_mut(|conn| {
            let res = conn.execute(
                "INSERT INTO influencers (id, email, password, name, location, keywords)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                (id, email, password_hash, name, location, keywords),
            );
            map_unique(res)
        })
    }

    pub fn get_influencer_by_email(&self, email: &str) -> Result<Option<InfluencerRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{INFLUENCER_SELECT} WHERE email = ?1"
            ))?;
            stmt.query_row([email], read_influencer).optional()
        })
    }

    pub fn get_influencer(&self, id: &str) -> Result<Option<InfluencerRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{INFLUENCER_SELECT} WHERE id = ?1"))?;
            stmt.query_row([id], read_influencer).optional()
        })
    }

    /// Entire catalog, stably ordered: followers descending, id ascending.
    pub fn list_influencers(&self) -> Result<Vec<InfluencerRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{INFLUENCER_SELECT} ORDER BY followers DESC, id ASC"
            ))?;
            let rows = stmt
                .query_map([], read_influencer)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn update_influencer_profile(
        &self,
        id: &str,
        name: &str,
        location: &str,
        keywords: &str,
        niche: Option<&str>,
        followers: i64,
        engagement_rate: Option<f64>,
        audience_age_range: Option<&str>,
        audience_gender_split: Option<&str>,
    ) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "UPDATE influencers
                 SET name = ?2, location = ?3, keywords = ?4, niche = ?5, followers = ?6,
                     engagement_rate = ?7, audience_age_range = ?8, audience_gender_split = ?9
                 WHERE id = ?1",
                rusqlite::params![
                    id,
                    name,
                    location,
                    keywords,
                    niche,
                    followers,
                    engagement_rate,
                    audience_age_range,
                    audience_gender_split
                ],
            )?;
            Ok(changed > 0)
        })
    }

    // -- Campaigns --

    #[allow(clippy::too_many_arguments)]
    pub fn create_campaign(
        &self,
        id: &str,
        brand_id: &str,
        name: &str,
        goal: Option<&str>,
        target_audience: Option<&str>,
        target_location: Option<&str>,
        budget: f64,
        brief: &str,
        is_public: bool,
    ) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO campaigns
                     (id, brand_id, name, goal, target_audience, target_location, budget, brief, is_public)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                rusqlite::params![
                    id,
                    brand_id,
                    name,
                    goal,
                    target_audience,
                    target_location,
                    budget,
                    brief,
                    is_public
                ],
            )?;
            Ok(())
        })
    }

    pub fn get_campaign(&self, id: &str) -> Result<Option<CampaignRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{CAMPAIGN_SELECT} WHERE id = ?1"))?;
            stmt.query_row([id], read_campaign).optional()
        })
    }

    pub fn list_campaigns_for_brand(&self, brand_id: &str) -> Result<Vec<CampaignRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{CAMPAIGN_SELECT} WHERE brand_id = ?1 ORDER BY created_at DESC, id ASC"
            ))?;
            let rows = stmt
                .query_map([brand_id], read_campaign)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn list_public_campaigns(&self) -> Result<Vec<CampaignRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{CAMPAIGN_SELECT} WHERE is_public = 1 ORDER BY created_at DESC, id ASC"
            ))?;
            let rows = stmt
                .query_map([], read_campaign)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Invites --

    pub fn insert_invite(
        &self,
        id: &str,
        campaign_id: &str,
        influencer_id: &str,
        status: &str,
    ) -> Result<InsertOutcome> {
        self.with_conn_mut(|conn| {
            let res = conn.execute(
                "INSERT INTO invites (id, campaign_id, influencer_id, status) VALUES (?1, ?2, ?3, ?4)",
                (id, campaign_id, influencer_id, status),
            );
            map_unique(res)
        })
    }

    pub fn get_invite(&self, id: &str) -> Result<Option<InviteRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{INVITE_SELECT} WHERE id = ?1"))?;
            stmt.query_row([id], read_invite).optional()
        })
    }

    pub fn get_invite_by_pair(
        &self,
        campaign_id: &str,
        influencer_id: &str,
    ) -> Result<Option<InviteRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{INVITE_SELECT} WHERE campaign_id = ?1 AND influencer_id = ?2"
            ))?;
            stmt.query_row([campaign_id, influencer_id], read_invite)
                .optional()
        })
    }

    pub fn list_invites_for_campaign(&self, campaign_id: &str) -> Result<Vec<InviteRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{INVITE_SELECT} WHERE campaign_id = ?1 ORDER BY created_at ASC, id ASC"
            ))?;
            let rows = stmt
                .query_map([campaign_id], read_invite)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn list_invites_for_influencer(&self, influencer_id: &str) -> Result<Vec<InviteRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{INVITE_SELECT} WHERE influencer_id = ?1 ORDER BY created_at ASC, id ASC"
            ))?;
            let rows = stmt
                .query_map([influencer_id], read_invite)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn update_invite_status(&self, id: &str, status: &str) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "UPDATE invites SET status = ?2 WHERE id = ?1",
                (id, status),
            )?;
            Ok(changed > 0)
        })
    }

    // -- Applications --

    pub fn insert_application(
        &self,
        id: &str,
        campaign_id: &str,
        influencer_id: &str,
    ) -> Result<InsertOutcome> {
        self.with_conn_mut(|conn| {
            let res = conn.execute(
                "INSERT INTO applications (id, campaign_id, influencer_id, status)
                 VALUES (?1, ?2, ?3, 'pending')",
                (id, campaign_id, influencer_id),
            );
            map_unique(res)
        })
    }

    pub fn get_application(&self, id: &str) -> Result<Option<ApplicationRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{APPLICATION_SELECT} WHERE id = ?1"))?;
            stmt.query_row([id], read_application).optional()
        })
    }

    pub fn list_applications_for_campaign(&self, campaign_id: &str) -> Result<Vec<ApplicationRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{APPLICATION_SELECT} WHERE campaign_id = ?1 ORDER BY created_at ASC, id ASC"
            ))?;
            let rows = stmt
                .query_map([campaign_id], read_application)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn list_applications_for_influencer(
        &self,
        influencer_id: &str,
    ) -> Result<Vec<ApplicationRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{APPLICATION_SELECT} WHERE influencer_id = ?1 ORDER BY created_at ASC, id ASC"
            ))?;
            let rows = stmt
                .query_map([influencer_id], read_application)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn reject_application(&self, id: &str) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "UPDATE applications SET status = 'rejected' WHERE id = ?1",
                [id],
            )?;
            Ok(changed > 0)
        })
    }

    /// Approve an application and materialize its invite in one transaction.
    ///
    /// The invite is inserted directly in `accepted` (an approved application
    /// is an implicit acceptance). When a brand-initiated invite already
    /// exists for the pair, the upsert moves it to `accepted` rather than
    /// duplicating it, so the pair ends with exactly one accepted invite in
    /// all success paths. Returns that invite row.
    pub fn approve_application(&self, application_id: &str, invite_id: &str) -> Result<InviteRow> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            tx.execute(
                "UPDATE applications SET status = 'approved' WHERE id = ?1",
                [application_id],
            )?;

            tx.execute(
                "INSERT INTO invites (id, campaign_id, influencer_id, status)
                 SELECT ?1, campaign_id, influencer_id, 'accepted'
                 FROM applications WHERE id = ?2
                 ON CONFLICT(campaign_id, influencer_id) DO UPDATE SET status = 'accepted'",
                (invite_id, application_id),
            )?;

            let invite = tx.query_row(
                &format!(
                    "{INVITE_SELECT} WHERE (campaign_id, influencer_id) =
                         (SELECT campaign_id, influencer_id FROM applications WHERE id = ?1)"
                ),
                [application_id],
                read_invite,
            )?;

            tx.commit()?;
            Ok(invite)
        })
    }

    // -- Submissions --

    pub fn insert_submission(&self, id: &str, invite_id: &str, content_url: &str) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO submissions (id, invite_id, content_url, status)
                 VALUES (?1, ?2, ?3, 'pending_review')",
                (id, invite_id, content_url),
            )?;
            Ok(())
        })
    }

    pub fn get_submission(&self, id: &str) -> Result<Option<SubmissionRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{SUBMISSION_SELECT} WHERE id = ?1"))?;
            stmt.query_row([id], read_submission).optional()
        })
    }

    pub fn list_submissions_for_invite(&self, invite_id: &str) -> Result<Vec<SubmissionRow>> {
        self.with_conn(|conn| {
            // rowid order, not created_at: resubmissions in the same second
            // must still come back newest-first.
            let mut stmt = conn.prepare(&format!(
                "{SUBMISSION_SELECT} WHERE invite_id = ?1 ORDER BY rowid DESC"
            ))?;
            let rows = stmt
                .query_map([invite_id], read_submission)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn update_submission_status(&self, id: &str, status: &str) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "UPDATE submissions SET status = ?2 WHERE id = ?1",
                (id, status),
            )?;
            Ok(changed > 0)
        })
    }
}

const INFLUENCER_SELECT: &str = "SELECT id, email, password, name, niche, location, followers, \
     engagement_rate, audience_age_range, audience_gender_split, keywords FROM influencers";

const CAMPAIGN_SELECT: &str = "SELECT id, brand_id, name, goal, target_audience, target_location, \
     budget, brief, is_public, created_at FROM campaigns";

const INVITE_SELECT: &str =
    "SELECT id, campaign_id, influencer_id, status, created_at FROM invites";

const APPLICATION_SELECT: &str =
    "SELECT id, campaign_id, influencer_id, status, created_at FROM applications";

const SUBMISSION_SELECT: &str =
    "SELECT id, invite_id, content_url, status, created_at FROM submissions";

fn read_influencer(row: &rusqlite::Row<'_>) -> rusqlite::Result<InfluencerRow> {
    Ok(InfluencerRow {
        id: row.get(0)?,
        email: row.get(1)?,
        password: row.get(2)?,
        name: row.get(3)?,
        niche: row.get(4)?,
        location: row.get(5)?,
        followers: row.get(6)?,
        engagement_rate: row.get(7)?,
        audience_age_range: row.get(8)?,
        audience_gender_split: row.get(9)?,
        keywords: row.get(10)?,
    })
}

fn read_campaign(row: &rusqlite::Row<'_>) -> rusqlite::Result<CampaignRow> {
    Ok(CampaignRow {
        id: row.get(0)?,
        brand_id: row.get(1)?,
        name: row.get(2)?,
        goal: row.get(3)?,
        target_audience: row.get(4)?,
        target_location: row.get(5)?,
        budget: row.get(6)?,
        brief: row.get(7)?,
        is_public: row.get(8)?,
        created_at: row.get(9)?,
    })
}

fn read_invite(row: &rusqlite::Row<'_>) -> rusqlite::Result<InviteRow> {
    Ok(InviteRow {
        id: row.get(0)?,
        campaign_id: row.get(1)?,
        influencer_id: row.get(2)?,
        status: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn read_application(row: &rusqlite::Row<'_>) -> rusqlite::Result<ApplicationRow> {
    Ok(ApplicationRow {
        id: row.get(0)?,
        campaign_id: row.get(1)?,
        influencer_id: row.get(2)?,
        status: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn read_submission(row: &rusqlite::Row<'_>) -> rusqlite::Result<SubmissionRow> {
    Ok(SubmissionRow {
        id: row.get(0)?,
        invite_id: row.get(1)?,
        content_url: row.get(2)?,
        status: row.get(3)?,
        created_at: row.get(4)?,
    })
}

/// Collapse a UNIQUE-constraint violation into [`InsertOutcome::Conflict`];
/// every other error propagates.
fn map_unique(res: rusqlite::Result<usize>) -> Result<InsertOutcome> {
    const SQLITE_CONSTRAINT_UNIQUE: std::ffi::c_int = 2067;
    const SQLITE_CONSTRAINT_PRIMARYKEY: std::ffi::c_int = 1555;

    match res {
        Ok(_) => Ok(InsertOutcome::Inserted),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.extended_code == SQLITE_CONSTRAINT_UNIQUE
                || e.extended_code == SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            Ok(InsertOutcome::Conflict)
        }
        Err(e) => Err(e.into()),
    }
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
