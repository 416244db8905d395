use std::sync::Arc;

use storefront_cache::{CacheAsideReader, CacheInvalidator, CachePort};
use storefront_db::{DbPool, PgStore};

use crate::config::ServerConfig;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone; everything inside is a pool handle or behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    /// Query port over `pool` used by paginated listings.
    pub store: PgStore,
    pub reader: CacheAsideReader,
    pub invalidator: CacheInvalidator,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(pool: DbPool, cache: Arc<dyn CachePort>, config: ServerConfig) -> Self {
        Self {
            store: PgStore::new(pool.clone()),
            pool,
            reader: CacheAsideReader::new(Arc::clone(&cache)),
            invalidator: CacheInvalidator::new(cache),
            config: Arc::new(config),
        }
    }
}
