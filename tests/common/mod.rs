//! Common test utilities and helpers
//!
//! Builds the full router on in-memory stores with a throwaway upload
//! directory, and wraps the requests the suites send most often.

#![allow(dead_code)]

use axum::http::HeaderValue;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use coursehub::backend::auth::users::MemoryAccountStore;
use coursehub::backend::courses::db::MemoryCourseStore;
use coursehub::backend::routes::create_router;
use coursehub::backend::server::{AppState, ServerConfig};

pub const TEST_SECRET: &str = "integration-test-secret";

/// 1x1 PNG
pub const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, 0x00, 0x00,
    0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4, 0x89, 0x00, 0x00, 0x00,
    0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00, 0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D,
    0xB4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// A running in-process app and the resources it owns
pub struct TestApp {
    pub server: TestServer,
    pub accounts: Arc<MemoryAccountStore>,
    pub upload_dir: TempDir,
}

pub fn test_config(upload_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        database_url: None,
        jwt_secret: TEST_SECRET.to_string(),
        token_ttl: Duration::from_secs(3600),
        bcrypt_cost: 4,
        upload_dir,
        max_upload_bytes: 64 * 1024,
        port: 0,
    }
}

impl TestApp {
    pub fn new() -> Self {
        let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");
        let config = test_config(upload_dir.path().to_path_buf());
        let accounts = Arc::new(MemoryAccountStore::new());
        let state = AppState::new(&config, accounts.clone(), Arc::new(MemoryCourseStore::new()));
        let server = TestServer::new(create_router(state)).expect("Failed to start test server");

        Self {
            server,
            accounts,
            upload_dir,
        }
    }

    /// Files currently in the upload directory
    pub fn uploaded_files(&self) -> Vec<String> {
        std::fs::read_dir(self.upload_dir.path())
            .map(|entries| {
                entries
                    .filter_map(Result::ok)
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub async fn register(&self, form: MultipartForm) -> TestResponse {
        self.server.post("/accounts/register").multipart(form).await
    }

    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.server
            .post("/accounts/login")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .await
    }

    /// Register an account with the given role and return its token
    pub async fn token_for(&self, email: &str, role: &str) -> String {
        let response = self.register(account_form(email, "pw123456").add_text("role", role)).await;
        let body: Value = response.json();
        body["data"]["user"]["token"]
            .as_str()
            .expect("registration returned no token")
            .to_string()
    }
}

/// Minimal valid registration form without an avatar
pub fn account_form(email: &str, password: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("firstName", "A")
        .add_text("lastName", "B")
        .add_text("email", email)
        .add_text("password", password)
}

pub fn png_part() -> Part {
    Part::bytes(PNG_BYTES.to_vec())
        .file_name("me.png")
        .mime_type("image/png")
}

/// Create authorization header value
pub fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).expect("token is not a valid header value")
}

/// Assert the error envelope
pub fn assert_error_body(response: &TestResponse, status: &str, message: &str) {
    let body: Value = response.json();
    assert_eq!(body["status"], status, "unexpected body: {}", body);
    assert_eq!(body["message"], message, "unexpected body: {}", body);
}
