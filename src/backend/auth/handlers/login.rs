/**
 * Login Handler
 *
 * Implements POST /accounts/login. Credential checks live in
 * `AccountService::login`; this handler only unwraps the body and wraps the
 * token.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{LoginRequest, TokenData};
use crate::backend::auth::registrar::AccountService;
use crate::backend::error::ApiError;
use crate::backend::extract::ApiJson;
use crate::shared::Envelope;

/// Login handler
///
/// # Errors
///
/// * `400 fail` - both credentials missing, or no account for the email
/// * `500 error` - password mismatch ("something wrong")
///
/// # Example Request
///
/// ```http
/// POST /accounts/login HTTP/1.1
/// Content-Type: application/json
///
/// { "email": "a@b.com", "password": "pw123456" }
/// ```
pub async fn login(
    State(accounts): State<AccountService>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<Envelope<TokenData>>, ApiError> {
    tracing::info!("Login request for email: {}", request.email.as_deref().unwrap_or(""));

    let token = accounts
        .login(request.email.as_deref(), request.password.as_deref())
        .await?;

    Ok(Json(Envelope::success(TokenData { token })))
}
