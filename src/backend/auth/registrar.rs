/**
 * Account Registration and Authentication
 *
 * `AccountService` orchestrates the store, the password hasher and the token
 * issuer for the register and login flows.
 *
 * # Registration Process
 *
 * 1. Look up the email; an existing account stops here (no hash, no token)
 * 2. Hash the password
 * 3. Build the account with its role and avatar reference
 * 4. Issue a token for `{email, id, role}` and cache it on the account
 * 5. Persist; only then is the account returned
 *
 * # Login Process
 *
 * 1. Reject when both email and password are blank
 * 2. Look the account up by email
 * 3. Verify the password against the stored hash
 * 4. Issue a fresh token (nothing is written back to the store)
 */

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use axum::http::StatusCode;

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::{AccountClaims, TokenIssuer};
use crate::backend::auth::users::{Account, AccountStore};
use crate::backend::db::StoreError;
use crate::backend::error::ApiError;
use crate::shared::{Pagination, UserRole};

pub const USER_EXISTS: &str = "user already exists";
pub const CREDENTIALS_REQUIRED: &str = "email or password are required";
pub const USER_NOT_FOUND: &str = "user not found";
pub const LOGIN_MISMATCH: &str = "something wrong";

/// Validated registration input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub avatar: String,
}

/// Register/login orchestration over the store, hasher and issuer
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn AccountStore>,
    hasher: Arc<dyn PasswordHasher>,
    issuer: Arc<dyn TokenIssuer>,
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}

impl AccountService {
    pub fn new(
        store: Arc<dyn AccountStore>,
        hasher: Arc<dyn PasswordHasher>,
        issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            store,
            hasher,
            issuer,
        }
    }

    /// Create an account and issue its first token
    ///
    /// # Errors
    ///
    /// * `400 fail` - the email is already registered
    /// * `500 error` - hashing, signing or storage failed
    pub async fn register(&self, new: NewAccount) -> Result<Account, ApiError> {
        if self.store.find_by_email(&new.email).await?.is_some() {
            tracing::warn!("Registration rejected, email already exists: {}", new.email);
            return Err(ApiError::fail(StatusCode::BAD_REQUEST, USER_EXISTS));
        }

        let password_hash = self.hasher.hash(&new.password).await?;

        let now = Utc::now();
        let mut account = Account {
            id: Uuid::new_v4(),
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            password_hash,
            role: new.role,
            avatar: new.avatar,
            token: None,
            created_at: now,
            updated_at: now,
        };

        let token = self.issuer.issue(&claims_for(&account))?;
        account.token = Some(token);

        match self.store.insert(&account).await {
            Ok(()) => {}
            Err(StoreError::Duplicate) => {
                tracing::warn!("Registration lost a race on email: {}", account.email);
                return Err(ApiError::fail(StatusCode::BAD_REQUEST, USER_EXISTS));
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!("Account created: {} ({})", account.email, account.role);
        Ok(account)
    }

    /// Check credentials and issue a fresh token
    ///
    /// Only rejects up front when *both* fields are blank; a blank password
    /// with a known email falls through to the hash comparison.
    ///
    /// # Errors
    ///
    /// * `400 fail` - both credentials blank, or no account for the email
    /// * `500 error` - password mismatch, or hashing/signing failed
    pub async fn login(&self, email: Option<&str>, password: Option<&str>) -> Result<String, ApiError> {
        if is_blank(email) && is_blank(password) {
            tracing::warn!("Login rejected: no credentials supplied");
            return Err(ApiError::fail(StatusCode::BAD_REQUEST, CREDENTIALS_REQUIRED));
        }

        let email = email.unwrap_or_default();
        let account = self.store.find_by_email(email).await?.ok_or_else(|| {
            tracing::warn!("Login rejected, user not found: {}", email);
            ApiError::fail(StatusCode::BAD_REQUEST, USER_NOT_FOUND)
        })?;

        let matched = self
            .hasher
            .verify(password.unwrap_or_default(), &account.password_hash)
            .await?;
        if !matched {
            tracing::warn!("Login rejected, password mismatch for: {}", email);
            return Err(ApiError::error(StatusCode::INTERNAL_SERVER_ERROR, LOGIN_MISMATCH));
        }

        let token = self.issuer.issue(&claims_for(&account))?;
        tracing::info!("Account logged in: {}", account.email);
        Ok(token)
    }

    /// One page of accounts
    pub async fn list(&self, page: Pagination) -> Result<Vec<Account>, ApiError> {
        Ok(self.store.list(page).await?)
    }
}

fn claims_for(account: &Account) -> AccountClaims {
    AccountClaims {
        email: account.email.clone(),
        id: account.id,
        role: account.role,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::password::{BcryptHasher, HashError};
    use crate::backend::auth::sessions::{TokenError, TokenService};
    use crate::backend::auth::users::MemoryAccountStore;
    use crate::shared::StatusText;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct CountingHasher {
        hashes: AtomicUsize,
        inner: BcryptHasher,
    }

    #[async_trait]
    impl PasswordHasher for CountingHasher {
        async fn hash(&self, plaintext: &str) -> Result<String, HashError> {
            self.hashes.fetch_add(1, Ordering::SeqCst);
            BcryptHasher::new(4).hash(plaintext).await
        }

        async fn verify(&self, plaintext: &str, digest: &str) -> Result<bool, HashError> {
            self.inner.verify(plaintext, digest).await
        }
    }

    struct CountingIssuer {
        issued: AtomicUsize,
        inner: TokenService,
    }

    impl TokenIssuer for CountingIssuer {
        fn issue(&self, claims: &AccountClaims) -> Result<String, TokenError> {
            self.issued.fetch_add(1, Ordering::SeqCst);
            self.inner.issue(claims)
        }
    }

    struct Fixture {
        service: AccountService,
        store: Arc<MemoryAccountStore>,
        hasher: Arc<CountingHasher>,
        issuer: Arc<CountingIssuer>,
        tokens: TokenService,
    }

    fn fixture() -> Fixture {
        let tokens = TokenService::new(b"registrar-secret", Duration::from_secs(3600));
        let store = Arc::new(MemoryAccountStore::new());
        let hasher = Arc::new(CountingHasher::default());
        let issuer = Arc::new(CountingIssuer {
            issued: AtomicUsize::new(0),
            inner: tokens.clone(),
        });
        let service = AccountService::new(store.clone(), hasher.clone(), issuer.clone());
        Fixture {
            service,
            store,
            hasher,
            issuer,
            tokens,
        }
    }

    fn new_account(email: &str) -> NewAccount {
        NewAccount {
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            email: email.to_string(),
            password: "pw123456".to_string(),
            role: UserRole::default(),
            avatar: "uploads/avatar.jpg".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_and_issues_token() {
        let f = fixture();
        let account = f.service.register(new_account("a@b.com")).await.unwrap();

        assert_ne!(account.password_hash, "pw123456");
        assert_eq!(account.role, UserRole::User);
        let claims = f.tokens.verify(account.token.as_deref().unwrap()).unwrap();
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.id, account.id);
        assert_eq!(claims.role, UserRole::User);
        assert_eq!(f.store.len().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_register_short_circuits() {
        let f = fixture();
        f.service.register(new_account("a@b.com")).await.unwrap();
        assert_eq!(f.hasher.hashes.load(Ordering::SeqCst), 1);
        assert_eq!(f.issuer.issued.load(Ordering::SeqCst), 1);

        let err = f.service.register(new_account("a@b.com")).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.category(), StatusText::Fail);
        assert_eq!(err.message().to_string(), USER_EXISTS);

        assert_eq!(f.hasher.hashes.load(Ordering::SeqCst), 1);
        assert_eq!(f.issuer.issued.load(Ordering::SeqCst), 1);
        assert_eq!(f.store.len().await, 1);
    }

    #[tokio::test]
    async fn test_login_with_correct_password() {
        let f = fixture();
        let account = f.service.register(new_account("a@b.com")).await.unwrap();

        let token = f.service.login(Some("a@b.com"), Some("pw123456")).await.unwrap();
        let claims = f.tokens.verify(&token).unwrap();
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.id, account.id);
    }

    #[tokio::test]
    async fn test_login_requires_some_credential() {
        let f = fixture();
        for (email, password) in [(None, None), (Some(""), Some("")), (Some(""), None)] {
            let err = f.service.login(email, password).await.unwrap_err();
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
            assert_eq!(err.message().to_string(), CREDENTIALS_REQUIRED);
        }
    }

    // Only both-blank is rejected up front; a blank password reaches the hash check
    #[tokio::test]
    async fn test_login_blank_password_passes_presence_check() {
        let f = fixture();
        f.service.register(new_account("a@b.com")).await.unwrap();

        let err = f.service.login(Some("a@b.com"), Some("")).await.unwrap_err();
        assert_ne!(err.message().to_string(), CREDENTIALS_REQUIRED);
        assert_eq!(err.message().to_string(), LOGIN_MISMATCH);
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let f = fixture();
        let err = f.service.login(Some("nobody@b.com"), Some("pw")).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.category(), StatusText::Fail);
        assert_eq!(err.message().to_string(), USER_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_login_password_mismatch_is_server_category() {
        let f = fixture();
        f.service.register(new_account("a@b.com")).await.unwrap();

        let err = f.service.login(Some("a@b.com"), Some("wrong")).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.category(), StatusText::Error);
        assert_eq!(err.message().to_string(), LOGIN_MISMATCH);
    }

    #[tokio::test]
    async fn test_login_does_not_write_back() {
        let f = fixture();
        let account = f.service.register(new_account("a@b.com")).await.unwrap();
        f.service.login(Some("a@b.com"), Some("pw123456")).await.unwrap();

        let stored = f.store.find_by_email("a@b.com").await.unwrap().unwrap();
        assert_eq!(stored.token, account.token);
    }

    #[tokio::test]
    async fn test_list_pages_accounts() {
        let f = fixture();
        for i in 0..3 {
            f.service.register(new_account(&format!("u{}@b.com", i))).await.unwrap();
        }
        let page = f.service.list(Pagination::new(2, 1)).await.unwrap();
        assert_eq!(page.len(), 2);
    }
}
