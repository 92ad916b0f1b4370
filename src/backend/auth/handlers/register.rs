/**
 * Register Handler
 *
 * This module implements the account registration handler for
 * POST /accounts/register.
 *
 * # Registration Process
 *
 * 1. Read the multipart body; an `avatar` part is checked against the upload
 *    policy as soon as it arrives, so a non-image stops the request before
 *    anything else happens
 * 2. Validate the text fields
 * 3. Write the avatar file (if any)
 * 4. Register the account (uniqueness, hashing, token, persistence)
 * 5. Return the created account with its token
 *
 * If step 4 fails after step 3 wrote a file, the file is removed again.
 */

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::Json,
};
use bytes::Bytes;
use std::sync::Arc;

use crate::backend::auth::handlers::types::{RegisterForm, UserData};
use crate::backend::auth::registrar::AccountService;
use crate::backend::auth::upload::{UploadDescriptor, UploadPolicy, AVATAR_PLACEHOLDER};
use crate::backend::error::ApiError;
use crate::shared::Envelope;

const AVATAR_FIELD: &str = "avatar";

/// An accepted avatar part, not yet written to disk
struct PendingAvatar {
    descriptor: UploadDescriptor,
    bytes: Bytes,
}

/// Drain the multipart body into the form and an optional avatar
async fn read_parts(
    mut multipart: Multipart,
    uploads: &UploadPolicy,
) -> Result<(RegisterForm, Option<PendingAvatar>), ApiError> {
    let mut form = RegisterForm::default();
    let mut avatar = None;

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        if name == AVATAR_FIELD {
            // Browsers send an empty, unnamed file part when no file was chosen
            if field.file_name().is_some_and(str::is_empty) {
                field.bytes().await?;
                continue;
            }
            let descriptor = uploads.accept(field.content_type())?;
            let bytes = field.bytes().await?;
            avatar = Some(PendingAvatar { descriptor, bytes });
        } else {
            let value = field.text().await?;
            if !form.set(&name, value) {
                tracing::debug!("Ignoring unknown registration field: {}", name);
            }
        }
    }

    Ok((form, avatar))
}

/// Register handler
///
/// # Errors
///
/// * `400 fail` - non-image avatar, invalid fields, or email already registered
/// * `413 fail` - body larger than the configured upload limit
/// * `500 error` - hashing, signing, storage or file I/O failed
///
/// # Example Response
///
/// ```json
/// {
///   "status": "success",
///   "data": {
///     "user": {
///       "id": "123e4567-e89b-12d3-a456-426614174000",
///       "firstName": "A",
///       "lastName": "B",
///       "email": "a@b.com",
///       "role": "USER",
///       "avatar": "uploads/user-1700000000000-0.png",
///       "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
///     }
///   }
/// }
/// ```
pub async fn register(
    State(accounts): State<AccountService>,
    State(uploads): State<Arc<UploadPolicy>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<Envelope<UserData>>), ApiError> {
    let (form, avatar) = read_parts(multipart?, &uploads).await?;

    let avatar_ref = avatar
        .as_ref()
        .map_or_else(|| AVATAR_PLACEHOLDER.to_string(), |a| a.descriptor.avatar_ref());
    let new_account = form.validate(avatar_ref)?;
    tracing::info!("Register request for email: {}", new_account.email);

    if let Some(pending) = &avatar {
        if let Err(e) = uploads.persist(&pending.descriptor, &pending.bytes).await {
            uploads.discard(&pending.descriptor).await;
            return Err(e.into());
        }
    }

    match accounts.register(new_account).await {
        Ok(user) => Ok((StatusCode::CREATED, Json(Envelope::success(UserData { user })))),
        Err(e) => {
            if let Some(pending) = &avatar {
                tracing::warn!("Registration failed, removing avatar {}", pending.descriptor.filename);
                uploads.discard(&pending.descriptor).await;
            }
            Err(e)
        }
    }
}
