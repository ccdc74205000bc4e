use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use uuid::Uuid;

use reach_db::Store;
use reach_engine::{EngagementLifecycle, MatchingEngine, entities};
use reach_types::api::{
    AccountRole, AuthResponse, Claims, LoginRequest, RegisterBrandRequest,
    RegisterInfluencerRequest,
};

use crate::blocking;
use crate::error::{ApiError, ApiResult};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: Arc<Store>,
    pub matching: MatchingEngine,
    pub lifecycle: EngagementLifecycle,
    pub jwt_secret: String,
}

impl AppStateInner {
    pub fn new(store: Arc<Store>, jwt_secret: String) -> Self {
        Self {
            matching: MatchingEngine::new(store.clone()),
            lifecycle: EngagementLifecycle::new(store.clone()),
            store,
            jwt_secret,
        }
    }
}

pub async fn register_brand(
    State(state): State<AppState>,
    Json(req): Json<RegisterBrandRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_credentials(&req.email, &req.password)?;
    let password_hash = hash_password(&req.password)?;

    let brand_id = Uuid::new_v4();
    let email = req.email.clone();
    let store = state.store.clone();
    blocking(move || {
        let outcome = store.create_brand(&brand_id.to_string(), &email, &password_hash)?;
        entities::registration_outcome(outcome)?;
        Ok(())
    })
    .await?;

    let token = mint_token(&state.jwt_secret, brand_id, &req.email, AccountRole::Brand)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user_id: brand_id,
            role: AccountRole::Brand,
            token,
        }),
    ))
}

pub async fn register_influencer(
    State(state): State<AppState>,
    Json(req): Json<RegisterInfluencerRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_credentials(&req.email, &req.password)?;
    if req.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name must not be empty".into()));
    }
    let password_hash = hash_password(&req.password)?;

    let influencer_id = Uuid::new_v4();
    let email = req.email.clone();
    let name = req.name.clone();
    let store = state.store.clone();
    blocking(move || {
        // New accounts start with a placeholder location and no keywords;
        // the profile update endpoint fills these in.
        let outcome = store.create_influencer(
            &influencer_id.to_string(),
            &email,
            &password_hash,
            name.trim(),
            "Not Set",
            "",
        )?;
        entities::registration_outcome(outcome)?;
        Ok(())
    })
    .await?;

    let token = mint_token(
        &state.jwt_secret,
        influencer_id,
        &req.email,
        AccountRole::Influencer,
    )?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user_id: influencer_id,
            role: AccountRole::Influencer,
            token,
        }),
    ))
}

pub async fn login_brand(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let store = state.store.clone();
    let email = req.email.clone();
    let row = blocking(move || {
        store.get_brand_by_email(&email).map_err(ApiError::from)
    })
    .await?
    .ok_or(ApiError::Unauthorized)?;

    verify_password(&req.password, &row.password)?;
    let brand_id: Uuid = row
        .id
        .parse()
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("corrupt brand id: {}", e)))?;

    let token = mint_token(&state.jwt_secret, brand_id, &row.email, AccountRole::Brand)?;
    Ok(Json(AuthResponse {
        user_id: brand_id,
        role: AccountRole::Brand,
        token,
    }))
}

pub async fn login_influencer(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let store = state.store.clone();
    let email = req.email.clone();
    let row = blocking(move || {
        store.get_influencer_by_email(&email).map_err(ApiError::from)
    })
    .await?
    .ok_or(ApiError::Unauthorized)?;

    verify_password(&req.password, &row.password)?;
    let influencer_id: Uuid = row
        .id
        .parse()
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("corrupt influencer id: {}", e)))?;

    let token = mint_token(
        &state.jwt_secret,
        influencer_id,
        &row.email,
        AccountRole::Influencer,
    )?;
    Ok(Json(AuthResponse {
        user_id: influencer_id,
        role: AccountRole::Influencer,
        token,
    }))
}

fn validate_credentials(email: &str, password: &str) -> ApiResult<()> {
    if !email.contains('@') || email.len() > 120 {
        return Err(ApiError::BadRequest("invalid email address".into()));
    }
    if password.len() < 8 {
        return Err(ApiError::BadRequest(
            "password must be at least 8 characters".into(),
        ));
    }
    Ok(())
}

fn hash_password(password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("password hashing failed: {}", e)))?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, stored_hash: &str) -> ApiResult<()> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("corrupt password hash: {}", e)))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| ApiError::Unauthorized)
}

fn mint_token(secret: &str, user_id: Uuid, email: &str, role: AccountRole) -> ApiResult<String> {
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        role,
        exp: (chrono::Utc::now() + chrono::Duration::days(30)).timestamp() as usize,
    };

    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(anyhow::anyhow!("token encoding failed: {}", e)))?;

    Ok(token)
}
