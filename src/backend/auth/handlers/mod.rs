//! Account Handlers Module
//!
//! This module contains the HTTP handlers for the `/accounts` endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── register.rs - Multipart registration with avatar upload
//! ├── login.rs    - Credential check and token issue
//! └── list.rs     - Paginated account listing (protected)
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /accounts/register
//! - **`login`** - POST /accounts/login
//! - **`list_accounts`** - GET /accounts (Bearer token required)

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

/// Account listing handler
pub mod list;

pub use types::{AccountSummary, LoginRequest, RegisterForm, TokenData, UserData, UsersData};

pub use list::list_accounts;
pub use login::login;
pub use register::register;
