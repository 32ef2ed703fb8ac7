use std::sync::Arc;

use tracing::{debug, info};

use crate::services::{jwt::TokenService, password::PasswordHasher, store::UserStore};

/// Application state shared across requests. Needs to be thread-safe.
pub struct AppState {
    /// The identity store holding user records.
    pub user_store: Arc<dyn UserStore>,
    /// JWT service for token generation and validation.
    pub token_service: TokenService,
    /// Password hasher with the configured bcrypt cost.
    pub password_hasher: PasswordHasher,
}

impl AppState {
    /// Creates a new application state with the provided services.
    ///
    /// # Arguments
    ///
    /// * `user_store` - Storage backend for user records
    /// * `token_service` - Service for JWT token operations
    /// * `password_hasher` - One-way credential hasher
    pub fn new(
        user_store: Arc<dyn UserStore>,
        token_service: TokenService,
        password_hasher: PasswordHasher,
    ) -> Self {
        info!("Initializing application state");
        debug!(bcrypt_cost = password_hasher.cost(), "Using password hasher");

        Self {
            user_store,
            token_service,
            password_hasher,
        }
    }
}
