//! # Password Hashing
//!
//! One-way bcrypt hashing for stored credentials. Both operations are CPU-bound
//! and run on the blocking thread pool so they don't stall other requests.

use tokio::task;
use tracing::{instrument, trace};

use crate::error::AppResult;
use crate::utils::constant::DEFAULT_BCRYPT_COST;

/// Hashes and verifies passwords with a fixed bcrypt work factor.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    #[instrument(skip_all, fields(cost = self.cost))]
    pub async fn hash(&self, password: &str) -> AppResult<String> {
        let password = password.to_owned();
        let cost = self.cost;
        let hashed = task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
        trace!("Password hashed");
        Ok(hashed)
    }

    /// Returns `false` on mismatch; `Err` only when the stored hash is unusable.
    #[instrument(skip_all)]
    pub async fn verify(&self, password: &str, hash: &str) -> AppResult<bool> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        let matches = task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
        Ok(matches)
    }
}
