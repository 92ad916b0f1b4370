//! Pagination parameters for list endpoints

use serde::Deserialize;

const DEFAULT_LIMIT: u32 = 10;
const DEFAULT_PAGE: u32 = 1;

/// `?limit=&page=` query parameters
///
/// Both values are 1-based and clamped to at least 1.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            page: DEFAULT_PAGE,
        }
    }
}

impl Pagination {
    pub fn new(limit: u32, page: u32) -> Self {
        Self { limit, page }
    }

    /// Number of rows to return
    pub fn limit(&self) -> u32 {
        self.limit.max(1)
    }

    /// Number of rows to skip: `(page - 1) * limit`
    pub fn offset(&self) -> u64 {
        u64::from(self.page.max(1) - 1) * u64::from(self.limit())
    }
}
