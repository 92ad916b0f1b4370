//! Authentication Module
//!
//! This module handles account registration, login, and the primitives they
//! are built from: password hashing, token issue/verification and avatar
//! upload checks.
//!
//! # Architecture
//!
//! - **`users`** - Account model and the `AccountStore` seam (Postgres and in-memory)
//! - **`password`** - bcrypt hashing behind the `PasswordHasher` seam
//! - **`sessions`** - HS256 tokens: `TokenIssuer` seam and `TokenService`
//! - **`upload`** - Avatar media type checks and file naming
//! - **`registrar`** - `AccountService`, the register/login orchestration
//! - **`handlers`** - HTTP handlers for `/accounts`
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs
//! ├── users.rs
//! ├── password.rs
//! ├── sessions.rs
//! ├── upload.rs
//! ├── registrar.rs
//! └── handlers/
//!     ├── mod.rs
//!     ├── types.rs
//!     ├── register.rs
//!     ├── login.rs
//!     └── list.rs
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: multipart form + optional avatar → account created → token returned with the account
//! 2. **Login**: email and password → hash verified → fresh token returned
//! 3. **Protected routes**: `Authorization: Bearer <token>` → verified by `middleware::auth`
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt on the blocking pool
//! - Tokens are stateless; expired and forged tokens are rejected alike
//! - Password hashes never appear in any response body

/// Account model and persistence
pub mod users;

/// Password hashing
pub mod password;

/// Token issue and verification
pub mod sessions;

/// Avatar upload checks
pub mod upload;

/// Register/login orchestration
pub mod registrar;

/// HTTP handlers for account endpoints
pub mod handlers;

pub use password::{BcryptHasher, HashError, PasswordHasher};
pub use registrar::{AccountService, NewAccount};
pub use sessions::{AccountClaims, TokenError, TokenIssuer, TokenService};
pub use upload::{UploadDescriptor, UploadError, UploadPolicy};
pub use users::{Account, AccountStore, MemoryAccountStore, PgAccountStore};
