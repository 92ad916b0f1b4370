//! Shared Error Types
//!
//! This module defines the validation error types used by request parsing for
//! both accounts and courses. A failed validation carries every offending
//! field, not only the first one.
//!
//! # Usage
//!
//! ```rust
//! use coursehub::shared::error::{FieldError, SharedError};
//!
//! let errors = vec![FieldError::new("title", "title is required")];
//! let result = SharedError::check(errors);
//! assert!(result.is_err());
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single field that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the offending field as it appears on the wire
    pub field: String,
    /// Human-readable reason
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Shared error types that can occur while parsing client input
#[derive(Debug, Error, Clone)]
pub enum SharedError {
    /// One or more fields failed validation
    #[error("Validation failed for {} field(s)", errors.len())]
    ValidationError {
        /// Every field that failed, in check order
        errors: Vec<FieldError>,
    },

    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Turn a list of collected field errors into a result
    pub fn check(errors: Vec<FieldError>) -> Result<(), Self> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self::ValidationError { errors })
        }
    }

    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }
}

/// Helper trait for converting serialization errors
impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

/// Basic shape check for an email address: `local@domain.tld`, no whitespace
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.len() >= 2,
        None => false,
    }
}
