//! Exercises [`PgUserStore`] against a real PostgreSQL database.
//!
//! `DATABASE_URL` must point at a server; each test gets a fresh database with
//! `migrations/` applied.

use sqlx::PgPool;
use tollgate::models::NewUser;
use tollgate::services::store::{PgUserStore, StoreError, UserStore};
use uuid::Uuid;

fn new_user(email: &str) -> NewUser {
    NewUser {
        name: "Ann".to_string(),
        email: email.to_string(),
        password_hash: "$2b$04$hash".to_string(),
    }
}

#[sqlx::test]
async fn create_then_find(pool: PgPool) {
    let store = PgUserStore::new(pool);

    let created = store.create(new_user("ann@x.com")).await.unwrap();

    let by_email = store.find_by_email("ann@x.com").await.unwrap().unwrap();
    let by_id = store.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(by_email.id, created.id);
    assert_eq!(by_id.email, "ann@x.com");
    assert!(store.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

#[sqlx::test]
async fn unique_violation_maps_to_conflict(pool: PgPool) {
    let store = PgUserStore::new(pool);
    store.create(new_user("ann@x.com")).await.unwrap();

    let duplicate = store.create(new_user("ann@x.com")).await;

    assert!(matches!(duplicate, Err(StoreError::Conflict)));
}
