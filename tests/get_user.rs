mod common;

use std::time::{SystemTime, UNIX_EPOCH};

use common::{TEST_JWT_SECRET, assert_error, spawn_app};
use jsonwebtoken::{EncodingKey, Header, encode};
use reqwest::StatusCode;
use tollgate::handlers::UserResponseBody;
use tollgate::services::jwt::Claims;
use uuid::Uuid;

fn sign(sub: &str, exp_offset: i64, secret: &str) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();
    let claims = Claims {
        sub: sub.to_string(),
        exp: now.checked_add_signed(exp_offset).unwrap(),
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

#[test_log::test(tokio::test)]
async fn valid_token_returns_registered_user() {
    let app = spawn_app().await;
    let registered = app.register("Ann", "ann@x.com", "secret1").await;
    let login = app.login("ann@x.com", "secret1").await;

    let response = app.get_user(Some(&login.token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: UserResponseBody = response.json().await.unwrap();
    assert_eq!(body.message, "User retrieved successfully");
    assert_eq!(body.user, registered.user);
}

#[test_log::test(tokio::test)]
async fn missing_token_fails_with_1004() {
    let app = spawn_app().await;

    let response = app.get_user(None).await;

    let body = assert_error(response, StatusCode::UNAUTHORIZED, 1004).await;
    assert_eq!(body["message"], "Unauthorized");
}

#[test_log::test(tokio::test)]
async fn bearer_authorization_header_is_not_accepted() {
    let app = spawn_app().await;
    app.register("Ann", "ann@x.com", "secret1").await;
    let login = app.login("ann@x.com", "secret1").await;

    let response = app
        .client
        .get(format!("{}/api/auth/getUser", app.address))
        .header("Authorization", format!("Bearer {}", login.token))
        .send()
        .await
        .unwrap();

    assert_error(response, StatusCode::UNAUTHORIZED, 1004).await;
}

#[test_log::test(tokio::test)]
async fn bad_tokens_fail_with_1004_never_500() {
    let app = spawn_app().await;
    let registered = app.register("Ann", "ann@x.com", "secret1").await;
    let user_id = registered.user.id.to_string();

    let test_cases = vec![
        ("garbage".to_string(), "malformed"),
        ("a.b.c".to_string(), "three garbage segments"),
        (sign(&user_id, -60, TEST_JWT_SECRET), "expired"),
        (sign(&user_id, 3600, "some-other-secret"), "wrong signature"),
        (sign("not-a-uuid", 3600, TEST_JWT_SECRET), "non-uuid subject"),
    ];

    for (token, description) in test_cases {
        let response = app.get_user(Some(&token)).await;
        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "Failed for case: {description}",
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["errorCode"], 1004, "Failed for case: {description}");
    }
}

#[test_log::test(tokio::test)]
async fn token_for_unknown_user_fails_with_1001() {
    let app = spawn_app().await;

    let token = sign(&Uuid::new_v4().to_string(), 3600, TEST_JWT_SECRET);
    let response = app.get_user(Some(&token)).await;

    assert_error(response, StatusCode::NOT_FOUND, 1001).await;
}
