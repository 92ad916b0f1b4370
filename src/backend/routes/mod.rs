//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs        - Module exports and documentation
//! ├── router.rs     - Main router creation, static files, layers, fallback
//! └── api_routes.rs - `/accounts` and `/courses` routes with their gates
//! ```
//!
//! # Route Types
//!
//! - `POST /accounts/register`, `POST /accounts/login`, `GET /accounts`
//! - `GET|POST /courses`, `GET|PATCH|DELETE /courses/{course_id}`
//! - `GET /uploads/<file>` - uploaded avatars
//!
//! # Example
//!
//! ```rust,no_run
//! use coursehub::backend::routes::create_router;
//! use coursehub::backend::server::{AppState, ServerConfig};
//!
//! # fn example(config: ServerConfig) {
//! let app_state = AppState::with_pool(&config, None);
//! let router = create_router(app_state);
//! # }
//! ```

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

pub use router::create_router;
