//! Store error kinds.
//!
//! Raw `sqlx` errors are classified by PostgreSQL SQLSTATE so callers can tell
//! a missing referenced row from a duplicate key from everything else.

use storefront_core::context::DeadlineExceeded;

/// PostgreSQL SQLSTATE for `foreign_key_violation`.
pub const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

/// PostgreSQL SQLSTATE for `unique_violation`.
pub const PG_UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL SQLSTATE for `query_canceled`, raised when `statement_timeout` fires.
pub const PG_QUERY_CANCELED: &str = "57014";

/// PostgreSQL SQLSTATE for `lock_not_available`, raised when `lock_timeout` fires.
pub const PG_LOCK_NOT_AVAILABLE: &str = "55P03";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A foreign key did not match any referenced row (e.g. unknown product).
    #[error("Referential integrity violation on {constraint}")]
    ReferentialIntegrity {
        constraint: String,
        #[source]
        source: sqlx::Error,
    },

    /// A unique constraint rejected a duplicate value.
    #[error("Duplicate value violates unique constraint {constraint}")]
    Uniqueness {
        constraint: String,
        #[source]
        source: sqlx::Error,
    },

    /// The request deadline elapsed before the store answered.
    #[error("Store operation exceeded the request deadline")]
    Timeout,

    /// Any other store failure.
    #[error("Storage error: {0}")]
    Storage(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if matches!(err, sqlx::Error::PoolTimedOut) {
            return StoreError::Timeout;
        }
        let Some((code, constraint)) = err.as_database_error().map(|db_err| {
            (
                db_err.code().map(|c| c.into_owned()),
                db_err.constraint().unwrap_or("unknown").to_string(),
            )
        }) else {
            return StoreError::Storage(err);
        };

        match code.as_deref() {
            Some(PG_FOREIGN_KEY_VIOLATION) => StoreError::ReferentialIntegrity {
                constraint,
                source: err,
            },
            Some(PG_UNIQUE_VIOLATION) => StoreError::Uniqueness {
                constraint,
                source: err,
            },
            Some(PG_QUERY_CANCELED | PG_LOCK_NOT_AVAILABLE) => StoreError::Timeout,
            _ => StoreError::Storage(err),
        }
    }
}

impl From<DeadlineExceeded> for StoreError {
    fn from(_: DeadlineExceeded) -> Self {
        StoreError::Timeout
    }
}
