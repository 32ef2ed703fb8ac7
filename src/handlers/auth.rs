//! # Authentication Handlers
//!
//! This module implements HTTP handlers for password-based authentication:
//!
//! 1. Registering an account with name, email and password
//! 2. Logging in with email and password to obtain an access token
//! 3. Reading the current user's record with that token
//!
//! Every failure path returns an [`AppError`]; the response body is rendered by
//! its `IntoResponse` implementation, never here.

use std::sync::Arc;

use axum::extract::{Extension, Json, State};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::models::{AppState, NewUser, UserResponse};
use crate::utils::validator::ValidatedJson;

/// Request payload for creating an account
#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

/// Request payload for logging in
#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

/// Response carrying a single user record
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponseBody {
    pub message: String,
    pub user: UserResponse,
}

/// Response returned after a successful login
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserResponse,
    pub token: String,
}

/// Creates a new user account.
///
/// POST /api/auth/register
///
/// The email lookup is a fast path only. The store's unique constraint decides
/// races between concurrent registrations, and its conflict maps to the same
/// `1002` error.
///
/// # Returns
///
/// - `200 OK` - User created, body carries the stored user (without hash)
/// - `400 Bad Request` - `1003` empty field, `1002` email already registered
/// - `422 Unprocessable Entity` - `2002` body missing, malformed or invalid
#[instrument(
    skip(state, payload),
    fields(
        email = %payload.email,
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<Json<UserResponseBody>> {
    debug!("Processing registration request");

    // 1. Required fields
    if payload.name.is_empty() || payload.email.is_empty() || payload.password.is_empty() {
        warn!("Registration with empty field");
        return Err(AppError::all_fields_required());
    }

    // 2. Existing account
    if state
        .user_store
        .find_by_email(&payload.email)
        .await?
        .is_some()
    {
        warn!("Email already registered");
        return Err(AppError::user_already_exists());
    }

    // 3. Hash password
    let password_hash = state.password_hasher.hash(&payload.password).await?;

    // 4. Insert user
    let user = state
        .user_store
        .create(NewUser {
            name: payload.name,
            email: payload.email,
            password_hash,
        })
        .await?;

    info!(user_id = %user.id, "User created successfully");
    Ok(Json(UserResponseBody {
        message: "User created successfully".to_string(),
        user: user.into(),
    }))
}

/// Authenticates a user and issues an access token.
///
/// POST /api/auth/login
///
/// # Returns
///
/// - `200 OK` - Credentials accepted, body carries user and token
/// - `400 Bad Request` - `1003` empty field, `1005` wrong password
/// - `404 Not Found` - `1001` no user with that email
/// - `422 Unprocessable Entity` - `2002` body missing, malformed or invalid
#[instrument(
    skip(state, payload),
    fields(
        email = %payload.email,
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    debug!("Processing login request");

    if payload.email.is_empty() || payload.password.is_empty() {
        warn!("Login with empty field");
        return Err(AppError::all_fields_required());
    }

    let Some(user) = state.user_store.find_by_email(&payload.email).await? else {
        warn!("Login for unknown email");
        return Err(AppError::user_not_found());
    };

    if !state
        .password_hasher
        .verify(&payload.password, &user.password_hash)
        .await?
    {
        warn!(user_id = %user.id, "Invalid password");
        return Err(AppError::invalid_password());
    }

    let token = state.token_service.issue(user.id)?;

    info!(user_id = %user.id, "User logged in successfully");
    Ok(Json(LoginResponse {
        message: "User logged in successfully".to_string(),
        user: user.into(),
        token,
    }))
}

/// Returns the authenticated user's record.
///
/// GET /api/auth/getUser
///
/// Identity comes from [`AuthUser`], inserted by the auth middleware.
///
/// # Returns
///
/// - `200 OK` - User found
/// - `401 Unauthorized` - `1004`, produced by the middleware
/// - `404 Not Found` - `1001`, token is valid but the user no longer exists
#[instrument(
    skip_all,
    fields(
        user_id = %user.user_id,
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> AppResult<Json<UserResponseBody>> {
    debug!("Processing get user request");

    let Some(record) = state.user_store.find_by_id(user.user_id).await? else {
        warn!("User from token not found in store");
        return Err(AppError::user_not_found());
    };

    info!("User retrieved successfully");
    Ok(Json(UserResponseBody {
        message: "User retrieved successfully".to_string(),
        user: record.into(),
    }))
}
