use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS brands (
            id          TEXT PRIMARY KEY,
            email       TEXT NOT NULL UNIQUE,
            password    TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS influencers (
            id                      TEXT PRIMARY KEY,
            email                   TEXT NOT NULL UNIQUE,
            password                TEXT NOT NULL,
            name                    TEXT NOT NULL,
            niche                   TEXT,
            location                TEXT NOT NULL,
            followers               INTEGER NOT NULL DEFAULT 0,
            engagement_rate         REAL,
            audience_age_range      TEXT,
            audience_gender_split   TEXT,
            keywords                TEXT NOT NULL DEFAULT '',
            created_at              TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_influencers_followers
            ON influencers(followers);

        CREATE TABLE IF NOT EXISTS campaigns (
            id                  TEXT PRIMARY KEY,
            brand_id            TEXT NOT NULL REFERENCES brands(id),
            name                TEXT NOT NULL,
            goal                TEXT,
            target_audience     TEXT,
            target_location     TEXT,
            budget              REAL NOT NULL,
            brief               TEXT NOT NULL,
            is_public           INTEGER NOT NULL DEFAULT 0,
            created_at          TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_campaigns_brand
            ON campaigns(brand_id);

        -- One invite per (campaign, influencer) pair, regardless of status.
        CREATE TABLE IF NOT EXISTS invites (
            id              TEXT PRIMARY KEY,
            campaign_id     TEXT NOT NULL REFERENCES campaigns(id),
            influencer_id   TEXT NOT NULL REFERENCES influencers(id),
            status          TEXT NOT NULL DEFAULT 'pending',
            created_at      TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE(campaign_id, influencer_id)
        );

        CREATE INDEX IF NOT EXISTS idx_invites_influencer
            ON invites(influencer_id);

        CREATE TABLE IF NOT EXISTS applications (
            id              TEXT PRIMARY KEY,
            campaign_id     TEXT NOT NULL REFERENCES campaigns(id),
            influencer_id   TEXT NOT NULL REFERENCES influencers(id),
            status          TEXT NOT NULL DEFAULT 'pending',
            created_at      TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE(campaign_id, influencer_id)
        );

        CREATE INDEX IF NOT EXISTS idx_applications_influencer
            ON applications(influencer_id);
        CREATE INDEX IF NOT EXISTS idx_applications_campaign
            ON applications(campaign_id);

        CREATE TABLE IF NOT EXISTS submissions (
            id              TEXT PRIMARY KEY,
            invite_id       TEXT NOT NULL REFERENCES invites(id),
            content_url     TEXT NOT NULL,
            status          TEXT NOT NULL DEFAULT 'pending_review',
            created_at      TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_submissions_invite
            ON submissions(invite_id, created_at);
        ",
    )?;

    info!("Store migrations complete");
    Ok(())
}
