//! Backend Module
//!
//! This module contains all server-side code for the coursehub application:
//! an Axum HTTP server exposing account registration/login and a course
//! catalogue, with token-based access control.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, app creation
//! - **`routes`** - Route configuration and router assembly
//! - **`auth`** - Accounts, password hashing, tokens, avatar uploads
//! - **`courses`** - Course model, store and handlers
//! - **`middleware`** - Auth gate and role gate
//! - **`error`** - `ApiError` and its conversion into responses
//! - **`extract`** - Extractors that reject with `ApiError`
//! - **`db`** - Shared persistence error type
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs
//! ├── main.rs      - Server binary
//! ├── server/
//! ├── routes/
//! ├── auth/
//! ├── courses/
//! ├── middleware/
//! ├── error/
//! ├── extract.rs
//! └── db.rs
//! ```
//!
//! # State Management
//!
//! `AppState` is built once at startup and is read-only afterwards. Stores
//! are trait objects: Postgres when `DATABASE_URL` is set, in-memory
//! otherwise.
//!
//! # Error Handling
//!
//! Every handler and middleware returns `Result<_, ApiError>`. Component
//! errors convert into `ApiError` with `?`, and `ApiError` is the only thing
//! that writes an error response.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication and account management
pub mod auth;

/// Course catalogue
pub mod courses;

/// Middleware for request processing
pub mod middleware;

/// Backend error types
pub mod error;

/// Request extractors
pub mod extract;

/// Persistence errors
pub mod db;

pub use error::ApiError;
pub use server::{create_app, AppState, ServerConfig};
