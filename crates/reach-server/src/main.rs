use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use reach_api::auth::{self, AppState, AppStateInner};
use reach_api::middleware::require_auth;
use reach_api::{campaigns, engagement, matching, profile};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reach=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let jwt_secret =
        std::env::var("REACH_JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
    let db_path = std::env::var("REACH_DB_PATH").unwrap_or_else(|_| "reach.db".into());
    let host = std::env::var("REACH_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("REACH_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;

    // Init store
    let store = Arc::new(reach_db::Store::open(&PathBuf::from(&db_path))?);

    // Shared state
    let app_state: AppState = Arc::new(AppStateInner::new(store, jwt_secret));

    // Routes
    let public_routes = Router::new()
        .route("/api/auth/brand/register", post(auth::register_brand))
        .route("/api/auth/brand/login", post(auth::login_brand))
        .route("/api/auth/influencer/register", post(auth::register_influencer))
        .route("/api/auth/influencer/login", post(auth::login_influencer))
        .with_state(app_state.clone());

    let protected_routes = Router::new()
        // Campaigns
        .route("/api/campaigns", get(campaigns::list_my_campaigns))
        .route("/api/campaigns", post(campaigns::create_campaign))
        .route("/api/campaigns/public", get(campaigns::list_public_campaigns))
        .route("/api/campaigns/{campaign_id}", get(campaigns::campaign_detail))
        .route(
            "/api/campaigns/{campaign_id}/applications",
            get(campaigns::campaign_applications),
        )
        // Matching & search
        .route("/api/campaigns/{campaign_id}/match", get(matching::rank_candidates))
        .route("/api/influencers/search", get(matching::search_catalog))
        // Engagement lifecycle
        .route("/api/invites", post(engagement::create_invite))
        .route("/api/invites/{invite_id}", put(engagement::respond_invite))
        .route("/api/applications", post(engagement::submit_application))
        .route(
            "/api/applications/{application_id}",
            put(engagement::review_application),
        )
        .route("/api/submissions", post(engagement::submit_content))
        .route(
            "/api/submissions/{submission_id}",
            put(engagement::review_submission),
        )
        .route(
            "/api/influencers/{influencer_id}/projects",
            get(engagement::list_projects),
        )
        // Influencer profile
        .route("/api/influencers/me", get(profile::get_profile))
        .route("/api/influencers/me", put(profile::update_profile))
        .layer(middleware::from_fn(require_auth))
        .with_state(app_state);

    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Reach server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
