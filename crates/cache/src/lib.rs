//! Cache-aside reads and prefix invalidation for paginated listings.
//!
//! The cache is an optimization, never a source of truth:
//!
//! - [`CacheAsideReader`] returns cached pages on hit and computes + stores on
//!   miss; a failed store never fails the read.
//! - [`CacheInvalidator`] drops every cached variant of a collection after a
//!   write. Callers wrap its result in [`NonFatal`].
//!
//! Backends implement [`CachePort`]: [`RedisCache`] in production,
//! [`MemoryCache`] for tests and single-process setups.

pub mod error;
pub mod invalidator;
pub mod key;
pub mod memory;
pub mod non_fatal;
pub mod port;
pub mod reader;
pub mod redis_cache;

pub use error::CacheError;
pub use invalidator::CacheInvalidator;
pub use key::CacheKey;
pub use memory::MemoryCache;
pub use non_fatal::NonFatal;
pub use port::CachePort;
pub use reader::CacheAsideReader;
pub use redis_cache::RedisCache;
