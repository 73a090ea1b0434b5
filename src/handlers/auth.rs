use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use axum::extract::{Extension, Path, State};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::auth::{generate_jwt, Claims};
use crate::domain::user::{Role, User};
use crate::error::ApiError;
use crate::middleware::extract::Json;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::policy::Actor;
use crate::store::Store;

use super::{require_fields, to_value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub user_type: Option<Role>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            tracing::error!("password hashing failed: {}", e);
            ApiError::internal("Failed to process credentials")
        })
}

fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::error!("stored password hash is unreadable: {}", e);
            false
        }
    }
}

/// POST /auth/register - Create an account and receive a token
pub async fn register(
    State(store): State<Store>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult {
    let mut missing = Vec::new();
    if payload.first_name.as_deref().unwrap_or("").trim().is_empty() {
        missing.push("firstName");
    }
    if payload.last_name.as_deref().unwrap_or("").trim().is_empty() {
        missing.push("lastName");
    }
    if payload.email.as_deref().unwrap_or("").trim().is_empty() {
        missing.push("email");
    }
    if payload.password.as_deref().unwrap_or("").is_empty() {
        missing.push("password");
    }
    if payload.user_type.is_none() {
        missing.push("userType");
    }
    require_fields(missing)?;

    let email = payload.email.unwrap().trim().to_lowercase();
    if !email.contains('@') {
        return Err(ApiError::validation("Invalid email address"));
    }
    let password = payload.password.unwrap();
    if password.len() < 6 {
        return Err(ApiError::validation(
            "Password must be at least 6 characters",
        ));
    }

    if store
        .users
        .find_one(|u| u.email == email)
        .await
        .is_some()
    {
        return Err(ApiError::validation("Email already registered"));
    }

    let user = User::new(
        payload.first_name.unwrap(),
        payload.last_name.unwrap(),
        email,
        hash_password(&password)?,
        payload.phone,
        payload.user_type.unwrap(),
    );
    let user = store.users.insert(user).await;

    let token = generate_jwt(Claims::new(user.id, user.user_type))?;
    Ok(ApiResponse::created()
        .field("token", json!(token))
        .field("user", to_value(&user)?))
}

/// POST /auth/login - Authenticate and receive a token
pub async fn login(State(store): State<Store>, Json(payload): Json<LoginRequest>) -> ApiResult {
    let mut missing = Vec::new();
    if payload.email.as_deref().unwrap_or("").trim().is_empty() {
        missing.push("email");
    }
    if payload.password.as_deref().unwrap_or("").is_empty() {
        missing.push("password");
    }
    require_fields(missing)?;

    let email = payload.email.unwrap().trim().to_lowercase();
    let password = payload.password.unwrap();

    // Same message for unknown email and bad password
    let user = store
        .users
        .find_one(|u| u.email == email)
        .await
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    if !verify_password(&password, &user.password) {
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let token = generate_jwt(Claims::new(user.id, user.user_type))?;
    Ok(ApiResponse::ok()
        .field("token", json!(token))
        .field("user", to_value(&user)?))
}

/// GET /api/auth/whoami - Current user record
pub async fn whoami(State(store): State<Store>, Extension(actor): Extension<Actor>) -> ApiResult {
    let user = store.users.require(actor.id).await?;
    Ok(ApiResponse::ok().field("user", to_value(&user)?))
}

/// PATCH /api/auth/favorites/:propertyId - Toggle a favourite property
pub async fn toggle_favorite(
    State(store): State<Store>,
    Extension(actor): Extension<Actor>,
    Path(property_id): Path<Uuid>,
) -> ApiResult {
    store.properties.require(property_id).await?;

    let mut user = store.users.require(actor.id).await?;
    let favorited = user.toggle_favorite(property_id);
    let user = store.users.replace(user).await?;

    Ok(ApiResponse::ok()
        .field("favorited", json!(favorited))
        .field("favoriteProperties", json!(user.favorite_properties)))
}
