/**
 * Session Tokens
 *
 * This module handles JWT issuance and verification. Tokens are HS256-signed
 * with a single server-wide secret and carry the account's email, id and role
 * plus `iat`/`exp`. Verification is stateless: signature and expiry only.
 */

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::shared::UserRole;

/// Identity asserted by a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountClaims {
    pub email: String,
    pub id: Uuid,
    pub role: UserRole,
}

/// Full JWT payload: identity claims plus validity window
#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    email: String,
    id: Uuid,
    role: UserRole,
    /// Issued at time (Unix timestamp)
    iat: u64,
    /// Expiration time (Unix timestamp)
    exp: u64,
}

/// Token signing or verification failure
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("jwt error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Signs identity claims into a compact credential
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, claims: &AccountClaims) -> Result<String, TokenError>;
}

/// HS256 token issuer and verifier
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}

fn unix_now() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default()
}

impl TokenService {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Validity window of issued tokens
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign `claims` as if issued at `issued_at`
    pub(crate) fn issue_at(&self, claims: &AccountClaims, issued_at: u64) -> Result<String, TokenError> {
        let payload = TokenClaims {
            email: claims.email.clone(),
            id: claims.id,
            role: claims.role,
            iat: issued_at,
            exp: issued_at.saturating_add(self.ttl.as_secs()),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &payload, &self.encoding)?)
    }

    /// Check signature and expiry, returning the embedded identity
    pub fn verify(&self, token: &str) -> Result<AccountClaims, TokenError> {
        let data = decode::<TokenClaims>(token, &self.decoding, &self.validation)?;
        let TokenClaims { email, id, role, .. } = data.claims;
        Ok(AccountClaims { email, id, role })
    }
}

impl TokenIssuer for TokenService {
    fn issue(&self, claims: &AccountClaims) -> Result<String, TokenError> {
        self.issue_at(claims, unix_now())
    }
}
