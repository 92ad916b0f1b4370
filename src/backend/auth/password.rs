/**
 * Password Hashing
 *
 * Salted one-way hashing with bcrypt. Each call to `hash` draws a fresh salt,
 * so hashing the same plaintext twice yields two different digests.
 * `verify` relies on bcrypt's own constant-time comparison.
 *
 * Both operations are CPU-bound and run on the blocking thread pool so that
 * request tasks keep yielding to the scheduler.
 */

use async_trait::async_trait;
use thiserror::Error;

/// Failure while hashing or verifying a password
#[derive(Debug, Error)]
pub enum HashError {
    #[error("bcrypt failure: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// One-way password hashing
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash `plaintext` with a random per-call salt
    async fn hash(&self, plaintext: &str) -> Result<String, HashError>;

    /// Check `plaintext` against a digest produced by [`PasswordHasher::hash`]
    async fn verify(&self, plaintext: &str, digest: &str) -> Result<bool, HashError>;
}

/// bcrypt-backed [`PasswordHasher`]
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// Work factor used when none is configured
    pub const DEFAULT_COST: u32 = 10;

    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COST)
    }
}

#[async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash(&self, plaintext: &str) -> Result<String, HashError> {
        let plaintext = plaintext.to_owned();
        let cost = self.cost;
        let digest = tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost)).await??;
        Ok(digest)
    }

    async fn verify(&self, plaintext: &str, digest: &str) -> Result<bool, HashError> {
        let plaintext = plaintext.to_owned();
        let digest = digest.to_owned();
        let matched = tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &digest)).await??;
        Ok(matched)
    }
}
