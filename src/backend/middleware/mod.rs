//! Middleware Module
//!
//! HTTP middleware that runs before handlers.
//!
//! - **`auth`** - Bearer token verification; attaches [`CurrentAccount`]
//! - **`roles`** - Role allow-list, layered inside `auth`
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware::from_fn_with_state, routing::get, Router};
//! use coursehub::backend::middleware::{auth_middleware, role_middleware, COURSE_ADMINS};
//! # fn example(tokens: std::sync::Arc<coursehub::backend::auth::TokenService>) {
//! let protected: Router = Router::new()
//!     .route("/admin", get(|| async { "ok" }))
//!     .route_layer(from_fn_with_state(COURSE_ADMINS, role_middleware))
//!     .route_layer(from_fn_with_state(tokens, auth_middleware));
//! # }
//! ```

pub mod auth;
pub mod roles;

pub use auth::{authenticate, auth_middleware, CurrentAccount, INVALID_TOKEN, TOKEN_REQUIRED};
pub use roles::{role_middleware, COURSE_ADMINS, ROLE_NOT_AUTHORIZED};
