//! Shared Module
//!
//! This module contains types that are shared between the HTTP layer and the
//! account/course domain code. Everything here is plain data: serialization
//! shapes, the closed role set, validation errors and pagination parameters.
//!
//! # Overview
//!
//! The shared module provides platform-agnostic types that can be used by
//! handlers, stores and tests alike. None of them perform I/O.

/// Response status categories and the success envelope
pub mod status;

/// Closed set of account roles
pub mod roles;

/// Shared validation error types
pub mod error;

/// Page/limit query parameters
pub mod pagination;

/// Re-export commonly used types for convenience
pub use status::{Envelope, StatusText};
pub use roles::{RoleParseError, UserRole};
pub use error::{FieldError, SharedError};
pub use pagination::Pagination;
