/**
 * Error Conversion
 *
 * This module turns every component failure into an `ApiError`, and every
 * `ApiError` into an HTTP response. It is the only place an error response
 * body is written.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "status": "fail",
 *   "message": "user already exists"
 * }
 * ```
 *
 * `message` is a list of `{field, message}` objects for validation failures.
 * Server-side causes are logged here and replaced by a generic message.
 */

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::any::Any;

use crate::backend::auth::password::HashError;
use crate::backend::auth::sessions::TokenError;
use crate::backend::auth::upload::UploadError;
use crate::backend::db::StoreError;
use crate::backend::error::types::{ApiError, ErrorMessage};
use crate::shared::{SharedError, StatusText};

#[derive(Serialize)]
struct ErrorBody<'a> {
    status: StatusText,
    message: &'a ErrorMessage,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            status: self.category(),
            message: self.message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

impl From<SharedError> for ApiError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { errors } => ApiError::validation(errors),
            SharedError::SerializationError { message } => ApiError::fail(StatusCode::BAD_REQUEST, message),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => ApiError::fail(StatusCode::CONFLICT, "resource already exists"),
            other => {
                tracing::error!("Store failure: {:?}", other);
                ApiError::internal()
            }
        }
    }
}

impl From<HashError> for ApiError {
    fn from(err: HashError) -> Self {
        tracing::error!("Password hashing failed: {:?}", err);
        ApiError::internal()
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        tracing::error!("Token signing failed: {:?}", err);
        ApiError::internal()
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::NotAnImage { content_type } => {
                tracing::warn!("Rejected upload with content type '{}'", content_type);
                ApiError::fail(StatusCode::BAD_REQUEST, "the file must be an image")
            }
            UploadError::Io(e) => {
                tracing::error!("Upload storage failed: {:?}", e);
                ApiError::internal()
            }
        }
    }
}

// Unsupported media type and unprocessable bodies are both reported as 400
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected JSON body: {}", rejection.body_text());
        ApiError::fail(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::fail(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::fail(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::fail(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::fail(err.status(), err.body_text())
    }
}

/// Response for a handler that panicked
///
/// Used with `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Handler panicked: {}", detail);
    ApiError::internal().into_response()
}
