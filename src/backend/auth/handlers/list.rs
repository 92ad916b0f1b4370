/**
 * Account Listing Handler
 *
 * Implements GET /accounts. Must be mounted behind `auth_middleware`.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::UsersData;
use crate::backend::auth::registrar::AccountService;
use crate::backend::error::ApiError;
use crate::backend::extract::ApiQuery;
use crate::backend::middleware::auth::CurrentAccount;
use crate::shared::{Envelope, Pagination};

/// List accounts, one page at a time
pub async fn list_accounts(
    State(accounts): State<AccountService>,
    CurrentAccount(caller): CurrentAccount,
    ApiQuery(page): ApiQuery<Pagination>,
) -> Result<Json<Envelope<UsersData>>, ApiError> {
    tracing::debug!(
        "Account listing by {} (limit {}, page {})",
        caller.email,
        page.limit(),
        page.page
    );

    let users = accounts.list(page).await?;
    Ok(Json(Envelope::success(UsersData::from(users))))
}
