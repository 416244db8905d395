//! The store port consumed by the paginated query executor.
//!
//! [`QueryPort`] is the narrow surface the executor needs: run a count query,
//! run a data query, and report which SQL dialect to emit. [`PgStore`] is the
//! PostgreSQL adapter over a `sqlx` pool.

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, PgPool, Postgres};
use storefront_core::filter::{FilterValue, Scalar, Sequence};

use crate::dialect::Dialect;
use crate::error::StoreError;

#[async_trait]
pub trait QueryPort: Send + Sync {
    /// Dialect used when emitting placeholders and window clauses.
    fn dialect(&self) -> Dialect;

    /// Run a query returning a single integer (`SELECT COUNT(*) ...`).
    async fn fetch_count(&self, sql: &str, args: &[FilterValue]) -> Result<i64, StoreError>;

    /// Run a data query and map every row into `T`.
    async fn fetch_rows<T>(&self, sql: &str, args: &[FilterValue]) -> Result<Vec<T>, StoreError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin;
}

/// [`QueryPort`] over a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueryPort for PgStore {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    async fn fetch_count(&self, sql: &str, args: &[FilterValue]) -> Result<i64, StoreError> {
        let query = bind_all(sqlx::query_as::<_, (i64,)>(sql), args);
        let (count,) = query.fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn fetch_rows<T>(&self, sql: &str, args: &[FilterValue]) -> Result<Vec<T>, StoreError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let query = bind_all(sqlx::query_as::<_, T>(sql), args);
        Ok(query.fetch_all(&self.pool).await?)
    }
}

/// Bind each filter argument to the next positional placeholder.
fn bind_all<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    args: &'q [FilterValue],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for arg in args {
        query = match arg {
            FilterValue::Scalar(Scalar::Text(value)) => query.bind(value),
            FilterValue::Scalar(Scalar::Int(value)) => query.bind(*value),
            FilterValue::Sequence(Sequence::Text(values)) => query.bind(values),
            FilterValue::Sequence(Sequence::Int(values)) => query.bind(values),
        };
    }
    query
}
