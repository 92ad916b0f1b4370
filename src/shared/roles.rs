//! Account roles
//!
//! Roles form a closed set. Parsing happens once, at the edge, so the rest of
//! the code base never deals with raw role strings.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Role carried by an account and embedded in its tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum UserRole {
    /// Regular account, the default
    #[default]
    #[serde(rename = "USER")]
    User,
    /// Full administrative access
    #[serde(rename = "ADMIN")]
    Admin,
    /// Course management access
    #[serde(rename = "MANAGER")]
    Manager,
}

/// Raised when a role string is not one of `USER`, `ADMIN`, `MANAGER`
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role '{0}'")]
pub struct RoleParseError(pub String);

impl UserRole {
    /// Every role, in declaration order
    pub const ALL: [UserRole; 3] = [UserRole::User, UserRole::Admin, UserRole::Manager];

    /// Stored and serialized name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
            Self::Manager => "MANAGER",
        }
    }

    /// Parse an optional form value; blank means "use the default role"
    pub fn parse_optional(value: Option<&str>) -> Result<Self, RoleParseError> {
        match value.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(raw) => raw.parse(),
        }
    }
}

impl FromStr for UserRole {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RoleParseError(s.to_string()))
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
