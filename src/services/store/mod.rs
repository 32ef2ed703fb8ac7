//! # Identity Store
//!
//! Persistence for user records behind the [`UserStore`] trait, so handlers can
//! run against PostgreSQL in production and an in-memory map in tests.
//!
//! ## Implementations
//!
//! - [`PgUserStore`] - PostgreSQL-backed store; email uniqueness enforced by index
//! - [`MemoryUserStore`] - Process-local store with the same uniqueness semantics

mod memory;
mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{NewUser, User};

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// A user with the same email already exists.
    #[error("email already registered")]
    Conflict,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Trait for user record storage
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new user and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if the email is already taken, even when
    /// a concurrent request registered it after the caller's own lookup.
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
}
