//! Response status categories
//!
//! Every JSON body produced by the server carries a `status` field with one
//! of three values: `success`, `fail` (client-caused) or `error`
//! (server-caused, or an authorization rejection).

use serde::{Deserialize, Serialize};

/// Status category written into every response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusText {
    /// The request succeeded
    Success,
    /// The client sent something the server refuses
    Fail,
    /// The server could not complete the request
    #[default]
    Error,
}

impl StatusText {
    /// Wire representation of this category
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Fail => "fail",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for StatusText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Success envelope: `{ "status": "success", "data": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: StatusText,
    pub data: T,
}

impl<T> Envelope<T> {
    /// Wrap `data` in a success envelope
    pub fn success(data: T) -> Self {
        Self {
            status: StatusText::Success,
            data,
        }
    }
}
