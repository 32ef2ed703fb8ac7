use async_trait::async_trait;
use dashmap::{DashMap, mapref::entry::Entry};
use time::OffsetDateTime;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::{StoreError, UserStore};
use crate::models::{NewUser, User};

/// In-memory user store keyed by id, with a secondary email index.
///
/// The email index is claimed through the map's entry API, so two concurrent
/// registrations of the same address cannot both succeed.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: DashMap<Uuid, User>,
    email_index: DashMap<String, Uuid>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    #[instrument(skip_all, fields(email = %user.email))]
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let id = Uuid::new_v4();

        match self.email_index.entry(user.email.clone()) {
            Entry::Occupied(_) => {
                debug!("Email already indexed");
                return Err(StoreError::Conflict);
            }
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }

        let record = User {
            id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: OffsetDateTime::now_utc(),
        };
        self.users.insert(id, record.clone());

        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let Some(id) = self.email_index.get(email).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }
}
