/**
 * Backend Error Types
 *
 * This module defines `ApiError`, the single failure object carried from any
 * component to the response boundary. Every failure path constructs exactly
 * one of these and returns it; nothing downstream writes its own response.
 *
 * # Error Categories
 *
 * - Validation (400, `fail`) - bad input, duplicate resource, missing fields
 * - Authorization (401, `error`) - missing, invalid or expired token
 * - Forbidden (403, `fail`) - role not allowed on the route
 * - Not Found (400/404, `fail`) - resource absent
 * - Server (500, `error`) - hashing, signing, storage or I/O faults
 */

use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::shared::{FieldError, StatusText};

/// Message carried by an error: plain text or a list of field errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    Text(String),
    Fields(Vec<FieldError>),
}

impl std::fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Fields(errors) => {
                let joined = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                f.write_str(&joined)
            }
        }
    }
}

impl From<String> for ErrorMessage {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for ErrorMessage {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<FieldError>> for ErrorMessage {
    fn from(errors: Vec<FieldError>) -> Self {
        Self::Fields(errors)
    }
}

/// Error signal returned by every fallible handler step
///
/// Carries everything the boundary needs to answer: status code, status
/// category and message. See `conversion.rs` for the response shape.
///
/// # Usage
///
/// ```rust
/// use coursehub::backend::error::ApiError;
/// use coursehub::shared::StatusText;
/// use axum::http::StatusCode;
///
/// let err = ApiError::create("user already exists", StatusCode::BAD_REQUEST, StatusText::Fail);
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{status}: {message}")]
pub struct ApiError {
    status: StatusCode,
    category: StatusText,
    message: ErrorMessage,
}

impl ApiError {
    /// Create an error signal from its three parts
    pub fn create(message: impl Into<ErrorMessage>, status: StatusCode, category: StatusText) -> Self {
        Self {
            status,
            category,
            message: message.into(),
        }
    }

    /// Client-caused failure (`fail`)
    pub fn fail(status: StatusCode, message: impl Into<ErrorMessage>) -> Self {
        Self::create(message, status, StatusText::Fail)
    }

    /// Server-side or authorization failure (`error`)
    pub fn error(status: StatusCode, message: impl Into<ErrorMessage>) -> Self {
        Self::create(message, status, StatusText::Error)
    }

    /// 400 `fail` carrying a list of field errors
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::fail(StatusCode::BAD_REQUEST, errors)
    }

    /// 401 `error`
    pub fn unauthorized(message: impl Into<ErrorMessage>) -> Self {
        Self::error(StatusCode::UNAUTHORIZED, message)
    }

    /// Generic 500 `error`; the cause is logged by the caller, never exposed
    pub fn internal() -> Self {
        Self::error(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
    }

    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    pub fn category(&self) -> StatusText {
        self.category
    }

    pub fn message(&self) -> &ErrorMessage {
        &self.message
    }
}
