//! Test helpers for Web API tests.
//!
//! Builds the real router over an in-memory database and a temporary
//! storage root, plus account helpers.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderName;
use axum_test::TestServer;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use files_manager::web::handlers::AppState;
use files_manager::web::router::create_router;
use files_manager::Database;
use serde_json::{json, Value};
use tempfile::TempDir;

/// Header carrying the session token.
pub const X_TOKEN: HeaderName = HeaderName::from_static("x-token");

/// A running test application.
pub struct TestApp {
    /// HTTP test client bound to the router.
    pub server: TestServer,
    /// Shared state, for inspecting collaborators directly.
    pub state: Arc<AppState>,
    /// Keeps the storage root alive.
    _temp_dir: TempDir,
}

/// Create a test server with an in-memory database.
pub async fn create_test_app() -> TestApp {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");

    let state = Arc::new(AppState::with_database(
        db,
        temp_dir.path().join("files_manager"),
        Duration::from_secs(3600),
    ));

    let router = create_router(state.clone(), &[]);
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        state,
        _temp_dir: temp_dir,
    }
}

/// `Authorization: Basic` value for the given credentials.
pub fn basic_auth(email: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{email}:{password}")))
}

/// Register an account and return the response body.
pub async fn sign_up(server: &TestServer, email: &str, password: &str) -> Value {
    let response = server
        .post("/users")
        .json(&json!({ "email": email, "password": password }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

/// Log in and return the session token.
pub async fn log_in(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .get("/connect")
        .add_header(AUTHORIZATION, basic_auth(email, password))
        .await;
    response.assert_status_ok();
    response.json::<Value>()["token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Register and log in. Returns `(user id, token)`.
pub async fn new_user(server: &TestServer, email: &str) -> (String, String) {
    let body = sign_up(server, email, "password123").await;
    let token = log_in(server, email, "password123").await;
    (body["id"].as_str().unwrap().to_string(), token)
}

/// Upload an entry and return the response body.
pub async fn upload(server: &TestServer, token: &str, body: Value) -> Value {
    let response = server
        .post("/files")
        .add_header(X_TOKEN, token.to_string())
        .json(&body)
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}
