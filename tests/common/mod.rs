//! Test helpers for HTTP API tests.
//!
//! Provides a router over an in-memory database, user seeding and login
//! helpers.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum_test::TestServer;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;
use tempfile::TempDir;

use filevault::web::router::{create_router, DEFAULT_BODY_LIMIT};
use filevault::{
    hash_password, AppState, Database, FileStorage, MemoryKvStore, NewUser, SessionManager,
    UserId, UserRepository,
};

/// Header carrying the session token.
pub const TOKEN: &str = "X-Token";

/// A router under test together with the stores behind it.
pub struct TestApp {
    pub server: TestServer,
    pub db: Database,
    pub sessions: Arc<SessionManager>,
    /// Content store root; removed when the app is dropped.
    pub storage_dir: TempDir,
}

/// Create a test server with an in-memory database and session store.
pub async fn create_test_app() -> TestApp {
    create_test_app_with_limit(DEFAULT_BODY_LIMIT).await
}

/// Create a test server with a custom request body limit.
pub async fn create_test_app_with_limit(body_limit: usize) -> TestApp {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let sessions = Arc::new(SessionManager::new(Arc::new(MemoryKvStore::new())));
    let storage_dir = TempDir::new().expect("Failed to create storage directory");
    let storage = FileStorage::new(storage_dir.path().join("files"));

    let app_state = Arc::new(AppState::new(db.clone(), sessions.clone(), storage));
    let router = create_router(app_state, &[], body_limit);
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        db,
        sessions,
        storage_dir,
    }
}

/// Seed a user with a hashed password.
pub async fn create_user(db: &Database, email: &str, password: &str) -> UserId {
    let digest = hash_password(password).expect("Failed to hash password");
    UserRepository::new(db.pool())
        .create(&NewUser::new(email, digest))
        .await
        .expect("Failed to create user")
        .id
}

/// `Authorization` header value for Basic credentials.
pub fn basic_auth(email: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{email}:{password}")))
}

/// Log in and return the session token.
pub async fn login(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .get("/connect")
        .add_header(AUTHORIZATION, basic_auth(email, password))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    body["token"]
        .as_str()
        .expect("token missing from login response")
        .to_string()
}

/// Seed a user and log in as them.
pub async fn create_user_and_login(app: &TestApp, email: &str, password: &str) -> String {
    create_user(&app.db, email, password).await;
    login(&app.server, email, password).await
}

/// Base64 payload for an upload body.
pub fn encode(content: &[u8]) -> String {
    STANDARD.encode(content)
}
