/**
 * Persistence Errors
 *
 * Shared error type for every store implementation (Postgres and in-memory).
 * A unique-constraint violation is surfaced as `Duplicate` so callers can
 * answer it the same way as a duplicate caught by an explicit lookup.
 */

use thiserror::Error;

/// Failure raised by a store
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write
    #[error("duplicate record")]
    Duplicate,

    /// A stored row could not be mapped back into a domain value
    #[error("corrupt record: {0}")]
    Corrupt(String),

    /// Any other database failure
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return Self::Duplicate;
            }
        }
        Self::Database(err)
    }
}

/// Convert a page limit/offset pair into the `i64` values Postgres binds
pub fn limit_offset(page: &crate::shared::Pagination) -> (i64, i64) {
    let limit = i64::from(page.limit());
    let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
    (limit, offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::Pagination;

    #[test]
    fn test_row_not_found_is_a_database_error() {
        let err: StoreError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, StoreError::Database(_)));
    }

    #[test]
    fn test_limit_offset() {
        assert_eq!(limit_offset(&Pagination::new(10, 3)), (10, 20));
        assert_eq!(limit_offset(&Pagination::default()), (10, 0));
    }
}
