//! Coursehub - Main Library
//!
//! HTTP backend for a course catalogue with account registration, login and
//! token-based access control.
//!
//! # Module Structure
//!
//! - **`shared`** - Plain data shared across the crate
//!   - Response status categories and the success envelope
//!   - The closed role set
//!   - Validation errors and pagination parameters
//!
//! - **`backend`** - Server-side code
//!   - Axum router, middleware and handlers
//!   - bcrypt password hashing and HS256 tokens
//!   - Avatar uploads
//!   - Postgres and in-memory stores
//!
//! # Usage
//!
//! ```rust,no_run
//! use coursehub::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `Result<T, E>` with `thiserror` enums per component
//! - `backend::error::ApiError` at the HTTP boundary
//! - `shared::SharedError` for validation

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
