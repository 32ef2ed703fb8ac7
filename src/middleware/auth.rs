//! # Authentication Middleware
//!
//! This module contains the authentication middleware that validates JWT tokens
//! and provides user context to protected routes.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, instrument, trace, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::AppState;
use crate::utils::constant::AUTH_TOKEN_HEADER;

/// Authentication middleware for protecting routes
///
/// This middleware validates the raw JWT carried in the [`AUTH_TOKEN_HEADER`]
/// header and extracts user information for use by downstream handlers.
///
/// # Authentication Flow
///
/// 1. Extracts the token from the `auth-token` header
/// 2. Validates the JWT token signature and expiration
/// 3. Parses user ID from token claims
/// 4. Adds [`AuthUser`] to request extensions for handler access
///
/// # Returns
///
/// - **Success**: Continues to next handler with user context
/// - **Failure**: [`AppError::unauthorized`] (`401`, code `1004`); the handler
///   is never invoked and the reason is only logged
#[instrument(
    skip_all,
    fields(
        method = %req.method(),
        uri = %req.uri(),
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    trace!("Processing authentication middleware");

    let token = req
        .headers()
        .get(AUTH_TOKEN_HEADER)
        .and_then(|header| header.to_str().ok())
        .map(str::trim)
        .filter(|token| !token.is_empty());

    let Some(token) = token else {
        warn!("Missing auth token header");
        return Err(AppError::unauthorized());
    };

    let claims = state.token_service.validate(token).map_err(|e| {
        warn!(error = %e, "Token validation failed");
        AppError::unauthorized()
    })?;

    let user_id = Uuid::try_parse(&claims.sub).map_err(|e| {
        warn!(error = %e, "Failed to parse user ID from token claims");
        AppError::unauthorized()
    })?;

    debug!(user_id = %user_id, "Authentication successful");
    req.extensions_mut().insert(AuthUser { user_id });

    Ok(next.run(req).await)
}

/// Authenticated user information available to handlers
///
/// This struct is inserted into request extensions by the authentication
/// middleware and can be extracted by route handlers that need user context.
///
/// # Usage in Handlers
///
/// ```rust
/// use axum::{extract::Extension, response::IntoResponse};
/// use tollgate::middleware::AuthUser;
/// async fn protected_handler(Extension(user): Extension<AuthUser>) -> impl IntoResponse {
///     format!("Hello user: {}", user.user_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Unique identifier for the authenticated user
    pub user_id: Uuid,
}
