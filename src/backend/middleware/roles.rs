/**
 * Role Middleware
 *
 * Restricts a route to a fixed set of roles. Must be layered inside
 * `auth_middleware` so the caller's identity is already attached.
 */

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

use crate::backend::error::ApiError;
use crate::backend::middleware::auth::{CurrentAccount, TOKEN_REQUIRED};
use crate::shared::UserRole;

pub const ROLE_NOT_AUTHORIZED: &str = "this role is not authorized";

/// Roles allowed to manage courses destructively
pub const COURSE_ADMINS: &[UserRole] = &[UserRole::Admin, UserRole::Manager];

/// Reject callers whose role is not in `allowed`
pub async fn role_middleware(
    State(allowed): State<&'static [UserRole]>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(CurrentAccount(claims)) = request.extensions().get::<CurrentAccount>() else {
        tracing::error!("Role check ran without an authenticated identity");
        return Err(ApiError::unauthorized(TOKEN_REQUIRED));
    };

    if !allowed.contains(&claims.role) {
        tracing::warn!("Role {} denied for {}", claims.role, claims.email);
        return Err(ApiError::fail(StatusCode::FORBIDDEN, ROLE_NOT_AUTHORIZED));
    }

    Ok(next.run(request).await)
}
