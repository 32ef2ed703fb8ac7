use async_trait::async_trait;
use sqlx::{PgPool, error::ErrorKind};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::{StoreError, UserStore};
use crate::models::{NewUser, User};

/// PostgreSQL-backed user store.
///
/// Expects the schema from `migrations/`, in particular the unique index on
/// `users.email`.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    db_pool: PgPool,
}

impl PgUserStore {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    #[instrument(skip_all, fields(email = %user.email))]
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.db_pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.kind() == ErrorKind::UniqueViolation => {
                debug!("Insert hit unique email constraint");
                StoreError::Conflict
            }
            e => StoreError::Database(e),
        })
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.db_pool)
        .await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?;
        Ok(user)
    }
}
