//! # Tollgate - User Authentication Backend
//!
//! Registration, login and current-user lookup over HTTP, backed by a
//! relational store and protected by signed access tokens.
//!
//! ## Modules
//!
//! - [`config`] - Startup configuration loaded once from the environment
//! - [`error`] - Error taxonomy and the single place errors become responses
//! - [`handlers`] - HTTP request handlers for the auth endpoints
//! - [`middleware`] - Token authentication for protected routes
//! - [`services`] - Token, password and user store services
//! - [`utils`] - Constants and request validation helpers

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use sqlx::postgres::PgPoolOptions;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::handle_panic;
use crate::handlers::{
    get_user, health_check, login, method_not_allowed, register, route_not_found,
};
use crate::middleware::auth_middleware;
use crate::models::AppState;
use crate::services::{
    jwt::TokenService,
    password::PasswordHasher,
    store::{MemoryUserStore, PgUserStore, UserStore},
};

/// Creates an Axum router wired to the given user store.
///
/// Token signing and password hashing are configured from `config`; nothing
/// here reads the environment.
pub fn app(config: &Config, user_store: Arc<dyn UserStore>) -> Router {
    let token_service = TokenService::new(&config.jwt_secret);
    let password_hasher = PasswordHasher::new(config.bcrypt_cost);

    app_with_state(Arc::new(AppState::new(
        user_store,
        token_service,
        password_hasher,
    )))
}

/// Creates an Axum router with application routes and the given state.
///
/// Protected routes sit behind [`auth_middleware`]. Every route is wrapped in
/// a panic catcher that renders the generic internal error body, and unmatched
/// paths or methods answer with the same body shape.
pub fn app_with_state(state: Arc<AppState>) -> Router {
    let protected_routes = Router::new()
        .route("/api/auth/getUser", get(get_user))
        .route_layer(from_fn_with_state(Arc::clone(&state), auth_middleware));

    let public_routes = Router::new()
        .route("/", get(health_check))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Builds the user store selected by `config`.
///
/// With `DATABASE_URL` set this connects to PostgreSQL and applies pending
/// migrations. Without it an in-memory store is used, which loses all users
/// on restart; [`Config`] refuses that combination in production.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn user_store(config: &Config) -> Result<Arc<dyn UserStore>, sqlx::Error> {
    let Some(database_url) = config.database_url.as_deref() else {
        warn!("DATABASE_URL not set, using in-memory user store");
        return Ok(Arc::new(MemoryUserStore::new()));
    };

    let db_pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    sqlx::migrate!("./migrations").run(&db_pool).await?;
    info!("Connected to PostgreSQL and applied migrations");

    Ok(Arc::new(PgUserStore::new(db_pool)))
}
