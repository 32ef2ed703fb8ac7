#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use reqwest::{Response, StatusCode};
use secrecy::SecretString;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tollgate::{
    config::Config,
    handlers::{LoginResponse, UserResponseBody},
    services::store::MemoryUserStore,
};

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

pub fn test_config() -> Config {
    Config {
        port: 0,
        jwt_secret: SecretString::from(TEST_JWT_SECRET.to_string()),
        database_url: None,
        // Lowest bcrypt cost; keeps the suite fast
        bcrypt_cost: 4,
        production: false,
    }
}

pub struct TestApp {
    pub address: String,
    pub store: Arc<MemoryUserStore>,
    pub client: reqwest::Client,
}

/// Spawns the application on a random port backed by an in-memory store.
pub async fn spawn_app() -> TestApp {
    let store = Arc::new(MemoryUserStore::new());
    let app = tollgate::app(&test_config(), store.clone());
    let address = spawn_router(app).await;

    TestApp {
        address,
        store,
        client: reqwest::Client::new(),
    }
}

/// Serves `app` on a random port and waits until it answers.
///
/// Returned address format: `http://127.0.0.1:8492`
pub async fn spawn_router(app: Router) -> String {
    // Randomly choose an available port
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port at localhost");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let address = format!("http://127.0.0.1:{port}");

    // Wait for server to be ready
    let client = reqwest::Client::new();
    for _ in 0..10 {
        if client.get(format!("{address}/")).send().await.is_ok() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }

    address
}

impl TestApp {
    pub async fn post_register(&self, body: &Value) -> Response {
        self.client
            .post(format!("{}/api/auth/register", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute register request")
    }

    pub async fn post_login(&self, body: &Value) -> Response {
        self.client
            .post(format!("{}/api/auth/login", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute login request")
    }

    pub async fn get_user(&self, token: Option<&str>) -> Response {
        let mut request = self
            .client
            .get(format!("{}/api/auth/getUser", self.address));
        if let Some(token) = token {
            request = request.header("auth-token", token);
        }
        request
            .send()
            .await
            .expect("Failed to execute getUser request")
    }

    /// Registers `email` with a valid password and returns the response body.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> UserResponseBody {
        let response = self
            .post_register(&json!({ "name": name, "email": email, "password": password }))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        response.json().await.expect("Failed to parse register response")
    }

    pub async fn login(&self, email: &str, password: &str) -> LoginResponse {
        let response = self
            .post_login(&json!({ "email": email, "password": password }))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        response.json().await.expect("Failed to parse login response")
    }
}

/// Asserts the uniform error body and returns it.
pub async fn assert_error(response: Response, status: StatusCode, error_code: u16) -> Value {
    assert_eq!(response.status(), status);
    let body: Value = response.json().await.expect("Error body should be JSON");

    let object = body.as_object().expect("Error body should be an object");
    assert_eq!(object.len(), 3, "unexpected error body shape: {body}");
    assert!(body["message"].is_string());
    assert!(object.contains_key("errors"));
    assert_eq!(body["errorCode"], error_code);

    body
}
