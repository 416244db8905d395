use std::time::Duration;

use storefront_cache::key::DEFAULT_TTL;
use storefront_db::Dialect;

use crate::auth::jwt::JwtConfig;

/// Which [`CachePort`](storefront_cache::CachePort) backend to build at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    Redis,
    Memory,
}

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    pub redis_url: String,
    /// Lifetime of cached listing pages.
    pub ttl: Duration,
}

impl CacheConfig {
    /// | Env Var          | Default                    |
    /// |------------------|----------------------------|
    /// | `CACHE_BACKEND`  | `redis` (or `memory`)      |
    /// | `REDIS_URL`      | `redis://127.0.0.1:6379/1` |
    /// | `CACHE_TTL_SECS` | `43200`                    |
    pub fn from_env() -> Self {
        let backend = match std::env::var("CACHE_BACKEND")
            .unwrap_or_else(|_| "redis".into())
            .to_ascii_lowercase()
            .as_str()
        {
            "redis" => CacheBackend::Redis,
            "memory" => CacheBackend::Memory,
            other => panic!("CACHE_BACKEND must be 'redis' or 'memory', got '{other}'"),
        };

        let redis_url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379/1".into());

        let ttl = std::env::var("CACHE_TTL_SECS")
            .ok()
            .map(|v| v.parse::<u64>().expect("CACHE_TTL_SECS must be a valid u64"))
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TTL);

        Self {
            backend,
            redis_url,
            ttl,
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except `DATABASE_URL` and `JWT_SECRET` have defaults suitable
/// for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// Per-request deadline, also enforced by the timeout layer.
    pub request_timeout_secs: u64,
    /// How long in-flight requests may drain after a shutdown signal.
    pub shutdown_timeout_secs: u64,
    pub database_url: String,
    pub database_max_connections: u32,
    pub cache: CacheConfig,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                 |
    /// |----------------------------|-------------------------|
    /// | `HOST`                     | `0.0.0.0`               |
    /// | `PORT`                     | `3000`                  |
    /// | `CORS_ORIGINS`             | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`     | `5`                     |
    /// | `SHUTDOWN_TIMEOUT_SECS`    | `10`                    |
    /// | `DATABASE_URL`             | required                |
    /// | `DATABASE_MAX_CONNECTIONS` | `20`                    |
    ///
    /// # Panics
    ///
    /// Panics on missing required variables, unparsable values, or a
    /// `DATABASE_URL` whose scheme is not PostgreSQL.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        match Dialect::detect(&database_url) {
            Some(Dialect::Postgres) => {}
            Some(other) => panic!("DATABASE_URL selects {other}, but only postgres has a driver"),
            None => panic!("DATABASE_URL has an unrecognised scheme"),
        }

        let database_max_connections: u32 = std::env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("DATABASE_MAX_CONNECTIONS must be a valid u32");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            database_url,
            database_max_connections,
            cache: CacheConfig::from_env(),
            jwt: JwtConfig::from_env(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
