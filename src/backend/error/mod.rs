//! Backend Error Module
//!
//! This module defines the error signal used by every HTTP handler and
//! middleware, and its conversion into responses.
//!
//! # Architecture
//!
//! The error module is organized into focused submodules:
//!
//! - **`types`** - `ApiError` and its constructors
//! - **`conversion`** - `IntoResponse`, `From` impls for component errors,
//!   and the panic response
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use coursehub::backend::error::ApiError;
//! use axum::http::StatusCode;
//!
//! async fn handler() -> Result<&'static str, ApiError> {
//!     Err(ApiError::fail(StatusCode::BAD_REQUEST, "user already exists"))
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::{ApiError, ErrorMessage};
pub use conversion::panic_response;
