//! PostgreSQL persistence for the storefront.
//!
//! - [`paginator`] -- generic filtered/paginated list queries.
//! - [`workflows`] -- multi-statement transactional writes (checkout, payment).
//! - [`repositories`] -- single-table reads and writes.

use sqlx::postgres::PgPoolOptions;

pub mod dialect;
pub mod error;
pub mod models;
pub mod paginator;
pub mod repositories;
pub mod store;
pub mod workflows;

pub use dialect::Dialect;
pub use error::StoreError;
pub use store::{PgStore, QueryPort};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
