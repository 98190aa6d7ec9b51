use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};

use pennywise_core::constants::MIN_PASSWORD_LENGTH;
use pennywise_core::users::{NewUser, User, UserUpdate};

use crate::auth::{AuthManager, CurrentUser};
use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest {
    username: String,
    password: String,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    access_token: String,
    user: User,
}

fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.is_empty() {
        return Err(ApiError::bad_request("Password is required"));
    }
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::bad_request(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    if body.username.trim().is_empty() {
        return Err(ApiError::bad_request("Username is required"));
    }
    validate_password(&body.password)?;
    let password_hash = AuthManager::hash_password(&body.password)?;

    let user = state
        .user_service
        .register(NewUser {
            username: body.username,
            email: body.email,
            password_hash,
            first_name: body.first_name,
            last_name: body.last_name,
        })
        .await?;

    let access_token = state.auth.issue_token(&user.id)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse { access_token, user }),
    ))
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    if body.username.is_empty() || body.password.is_empty() {
        return Err(ApiError::bad_request("Username and password are required"));
    }

    // One unspecific message for both unknown user and wrong password.
    let invalid = || ApiError::unauthorized("Invalid username or password");

    let user = state
        .user_service
        .get_by_username(&body.username)?
        .ok_or_else(invalid)?;
    if !AuthManager::verify_password(&body.password, &user.password_hash) {
        return Err(invalid());
    }

    let access_token = state.auth.issue_token(&user.id)?;
    Ok(Json(AuthResponse { access_token, user }))
}

async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<User>> {
    let user = state
        .user_service
        .get_user(&current.id)?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(Json(user))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProfileRequest {
    email: Option<String>,
    password: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
}

async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<UpdateProfileRequest>,
) -> ApiResult<Json<User>> {
    let password_hash = match body.password.as_deref() {
        Some(password) => {
            validate_password(password)?;
            Some(AuthManager::hash_password(password)?)
        }
        None => None,
    };

    let user = state
        .user_service
        .update_profile(
            &current.id,
            UserUpdate {
                email: body.email,
                password_hash,
                first_name: body.first_name,
                last_name: body.last_name,
            },
        )
        .await?;
    Ok(Json(user))
}

/// Routes that require no token.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// Routes behind the auth middleware.
pub fn protected_router() -> Router<Arc<AppState>> {
    Router::new().route("/auth/me", get(get_profile).put(update_profile))
}
