/**
 * Authentication Middleware
 *
 * This module protects routes that require a signed-in account. It reads the
 * `Authorization: Bearer <token>` header, verifies the token, and attaches the
 * embedded identity to the request extensions as [`CurrentAccount`].
 *
 * Per request the gate moves through: no token → token present → valid or
 * invalid. A missing header answers `401 "token is required"`; any
 * verification failure (bad signature, expired, malformed, wrong scheme)
 * answers the same `401 "Invalid token"`. The gate never touches the store
 * and never issues a replacement token.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::backend::auth::sessions::{AccountClaims, TokenService};
use crate::backend::error::ApiError;

pub const TOKEN_REQUIRED: &str = "token is required";
pub const INVALID_TOKEN: &str = "Invalid token";

/// Identity of the caller, set by [`auth_middleware`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentAccount(pub AccountClaims);

/// Resolve an `Authorization` header value into verified claims
pub fn authenticate(tokens: &TokenService, header: Option<&HeaderValue>) -> Result<AccountClaims, ApiError> {
    let header = match header {
        Some(value) if !value.as_bytes().iter().all(u8::is_ascii_whitespace) => value,
        _ => {
            tracing::warn!("Missing Authorization header");
            return Err(ApiError::unauthorized(TOKEN_REQUIRED));
        }
    };

    let token = header
        .to_str()
        .ok()
        .and_then(|raw| raw.trim().split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim())
        .ok_or_else(|| {
            tracing::warn!("Invalid Authorization header format");
            ApiError::unauthorized(INVALID_TOKEN)
        })?;

    tokens.verify(token).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        ApiError::unauthorized(INVALID_TOKEN)
    })
}

/// Authentication middleware
///
/// Returns 401 if the token is missing or invalid; otherwise inserts
/// [`CurrentAccount`] and runs the next stage.
pub async fn auth_middleware(
    State(tokens): State<Arc<TokenService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = authenticate(&tokens, request.headers().get(AUTHORIZATION))?;
    request.extensions_mut().insert(CurrentAccount(claims));
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for CurrentAccount
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<CurrentAccount>().cloned().ok_or_else(|| {
            tracing::warn!("CurrentAccount not found in request extensions");
            ApiError::unauthorized(TOKEN_REQUIRED)
        })
    }
}
