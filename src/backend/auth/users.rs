/**
 * Account Model and Stores
 *
 * This module holds the account record, the `AccountStore` seam, and its two
 * implementations: Postgres (`PgAccountStore`) and in-process
 * (`MemoryAccountStore`). Both enforce email uniqueness on insert, which is
 * the last line of defence against two concurrent registrations racing past
 * the lookup in the registrar.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::db::{limit_offset, StoreError};
use crate::shared::{Pagination, UserRole};

/// Account record
///
/// `password_hash` is never serialized. `token` holds the credential issued at
/// registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique account ID (UUID)
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// Unique, validated email address
    pub email: String,
    /// Hashed password (bcrypt)
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    /// Public avatar path, e.g. `uploads/user-1700000000000-0.png`
    pub avatar: String,
    /// Last issued token, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Persistence seam for accounts
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Look an account up by exact email
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    /// Insert a new account; a taken email yields [`StoreError::Duplicate`]
    async fn insert(&self, account: &Account) -> Result<(), StoreError>;

    /// One page of accounts in creation order
    async fn list(&self, page: Pagination) -> Result<Vec<Account>, StoreError>;
}

/// Row shape as stored in Postgres; `role` is plain text
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    password_hash: String,
    role: String,
    avatar: String,
    token: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = StoreError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let role = row
            .role
            .parse::<UserRole>()
            .map_err(|e| StoreError::Corrupt(format!("account {}: {}", row.id, e)))?;

        Ok(Account {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            password_hash: row.password_hash,
            role,
            avatar: row.avatar,
            token: row.token,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Postgres-backed [`AccountStore`]
#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, first_name, last_name, email, password_hash, role, avatar, token, created_at, updated_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Account::try_from).transpose()
    }

    async fn insert(&self, account: &Account) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, first_name, last_name, email, password_hash, role, avatar, token, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(account.id)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.role.as_str())
        .bind(&account.avatar)
        .bind(&account.token)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self, page: Pagination) -> Result<Vec<Account>, StoreError> {
        let (limit, offset) = limit_offset(&page);
        let rows = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, first_name, last_name, email, password_hash, role, avatar, token, created_at, updated_at
            FROM accounts
            ORDER BY created_at, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Account::try_from).collect()
    }
}

/// In-process [`AccountStore`], used when no database is configured
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<Vec<Account>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|a| a.email == email).cloned())
    }

    async fn insert(&self, account: &Account) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(StoreError::Duplicate);
        }
        accounts.push(account.clone());
        Ok(())
    }

    async fn list(&self, page: Pagination) -> Result<Vec<Account>, StoreError> {
        let accounts = self.accounts.read().await;
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        Ok(accounts.iter().skip(skip).take(take).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(email: &str) -> Account {
        let now = Utc::now();
        Account {
            id: Uuid::new_v4(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            email: email.to_string(),
            password_hash: "$2b$04$hash".to_string(),
            role: UserRole::User,
            avatar: "uploads/avatar.jpg".to_string(),
            token: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_memory_store_find_by_email() {
        let store = MemoryAccountStore::new();
        store.insert(&account("a@b.com")).await.unwrap();

        assert!(store.find_by_email("a@b.com").await.unwrap().is_some());
        assert!(store.find_by_email("x@b.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_rejects_duplicate_email() {
        let store = MemoryAccountStore::new();
        store.insert(&account("a@b.com")).await.unwrap();

        let result = store.insert(&account("a@b.com")).await;
        assert!(matches!(result, Err(StoreError::Duplicate)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_memory_store_pages() {
        let store = MemoryAccountStore::new();
        for i in 0..5 {
            store.insert(&account(&format!("u{}@b.com", i))).await.unwrap();
        }

        let page = store.list(Pagination::new(2, 2)).await.unwrap();
        let emails: Vec<_> = page.iter().map(|a| a.email.as_str()).collect();
        assert_eq!(emails, vec!["u2@b.com", "u3@b.com"]);

        assert!(store.list(Pagination::new(2, 4)).await.unwrap().is_empty());
    }

    #[test]
    fn test_serialization_hides_password_hash() {
        let value = serde_json::to_value(account("a@b.com")).unwrap();
        assert!(value.get("passwordHash").is_none());
        assert!(value.get("token").is_none());
        assert_eq!(value["firstName"], "A");
        assert_eq!(value["role"], "USER");
    }

    #[test]
    fn test_row_with_unknown_role_is_corrupt() {
        let now = Utc::now();
        let row = AccountRow {
            id: Uuid::new_v4(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            email: "a@b.com".to_string(),
            password_hash: "x".to_string(),
            role: "ROOT".to_string(),
            avatar: "uploads/avatar.jpg".to_string(),
            token: None,
            created_at: now,
            updated_at: now,
        };
        assert!(matches!(Account::try_from(row), Err(StoreError::Corrupt(_))));
    }
}
