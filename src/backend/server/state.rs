/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` holds the services built once at startup:
 * - `AccountService` (account store + password hasher + token issuer)
 * - the course store
 * - the token verifier used by the auth middleware
 * - the avatar upload policy
 *
 * Stores sit behind trait objects so the same router runs against Postgres
 * or the in-memory stores.
 *
 * # State Extraction
 *
 * Handlers extract only the part they use, e.g. `State<AccountService>` or
 * `State<Arc<dyn CourseStore>>`.
 */

use axum::extract::FromRef;
use sqlx::PgPool;
use std::sync::Arc;

use crate::backend::auth::password::BcryptHasher;
use crate::backend::auth::registrar::AccountService;
use crate::backend::auth::sessions::TokenService;
use crate::backend::auth::upload::UploadPolicy;
use crate::backend::auth::users::{AccountStore, MemoryAccountStore, PgAccountStore};
use crate::backend::courses::db::{CourseStore, MemoryCourseStore, PgCourseStore};
use crate::backend::server::config::ServerConfig;

/// Application state shared by every request handler
#[derive(Clone)]
pub struct AppState {
    /// Register/login/list orchestration
    pub accounts: AccountService,

    /// Course persistence
    pub courses: Arc<dyn CourseStore>,

    /// Verifies bearer tokens on protected routes
    pub tokens: Arc<TokenService>,

    /// Avatar acceptance and storage
    pub uploads: Arc<UploadPolicy>,

    /// Body size cap for the registration route
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Wire services from configuration and the chosen stores
    pub fn new(
        config: &ServerConfig,
        account_store: Arc<dyn AccountStore>,
        course_store: Arc<dyn CourseStore>,
    ) -> Self {
        let tokens = Arc::new(TokenService::new(config.jwt_secret.as_bytes(), config.token_ttl));
        let hasher = Arc::new(BcryptHasher::new(config.bcrypt_cost));
        let accounts = AccountService::new(account_store, hasher, tokens.clone());

        Self {
            accounts,
            courses: course_store,
            tokens,
            uploads: Arc::new(UploadPolicy::new(config.upload_dir.clone())),
            max_upload_bytes: config.max_upload_bytes,
        }
    }

    /// Postgres stores when a pool is available, in-memory otherwise
    pub fn with_pool(config: &ServerConfig, pool: Option<PgPool>) -> Self {
        match pool {
            Some(pool) => Self::new(
                config,
                Arc::new(PgAccountStore::new(pool.clone())),
                Arc::new(PgCourseStore::new(pool)),
            ),
            None => Self::new(
                config,
                Arc::new(MemoryAccountStore::new()),
                Arc::new(MemoryCourseStore::new()),
            ),
        }
    }
}

impl FromRef<AppState> for AccountService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.accounts.clone()
    }
}

impl FromRef<AppState> for Arc<dyn CourseStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.courses.clone()
    }
}

impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for Arc<UploadPolicy> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.uploads.clone()
    }
}
