//! Read-through cache for computed pages.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use storefront_core::context::RequestContext;

use crate::error::CacheError;
use crate::key::CacheKey;
use crate::non_fatal::NonFatal;
use crate::port::CachePort;

#[derive(Clone)]
pub struct CacheAsideReader {
    cache: Arc<dyn CachePort>,
}

impl CacheAsideReader {
    pub fn new(cache: Arc<dyn CachePort>) -> Self {
        Self { cache }
    }

    /// Return the cached value under `key`, or run `compute` and cache its result.
    ///
    /// - Hit: the payload is decoded; a corrupt payload is an error, not a miss.
    /// - Miss: `compute` runs; on success the value is stored for `ttl`, and a
    ///   failed store is only logged.
    /// - Deadline elapsed during the lookup: [`CacheError::Timeout`].
    /// - Backend unreachable during the lookup: [`CacheError::Unavailable`];
    ///   `compute` does not run.
    ///
    /// Concurrent misses on one key each compute and each store; last write wins.
    pub async fn fetch_or_compute<T, E, F, Fut>(
        &self,
        ctx: &RequestContext,
        key: &CacheKey,
        ttl: Duration,
        compute: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<CacheError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let lookup = match ctx.within(self.cache.get(key.as_str())).await {
            Ok(lookup) => lookup,
            Err(deadline) => Err(deadline.into()),
        };

        match lookup {
            Ok(Some(payload)) => {
                tracing::debug!(key = %key, "Cache hit");
                return serde_json::from_str(&payload)
                    .map_err(|err| E::from(CacheError::Serialization(err)));
            }
            Ok(None) => tracing::debug!(key = %key, "Cache miss"),
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "Cache lookup failed");
                return Err(err.into());
            }
        }

        let value = compute().await?;
        self.store(ctx, key, &value, ttl).await;
        Ok(value)
    }

    async fn store<T: Serialize>(&self, ctx: &RequestContext, key: &CacheKey, value: &T, ttl: Duration) {
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(err) => {
                NonFatal::new("cache encode", Err::<(), _>(CacheError::from(err))).log();
                return;
            }
        };
        let outcome = match ctx.within(self.cache.set(key.as_str(), &payload, ttl)).await {
            Ok(outcome) => outcome,
            Err(deadline) => Err(deadline.into()),
        };
        NonFatal::new("cache set", outcome).log();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use storefront_core::context::Locale;
    use storefront_core::paging::{PageInfo, PageRequest, PageResult};

    use super::*;
    use crate::invalidator::CacheInvalidator;
    use crate::key::{cart_prefix, DEFAULT_TTL};
    use crate::memory::MemoryCache;

    fn ctx() -> RequestContext {
        RequestContext::with_timeout(Duration::from_secs(5), "reader", Locale::En)
    }

    fn page(records: Vec<String>, total: i64) -> PageResult<String> {
        PageResult::new(PageInfo::pending(&PageRequest::default()).with_total(total), records)
    }

    fn cart_key(customer_id: i64, page: i64) -> CacheKey {
        CacheKey::builder(cart_prefix(customer_id))
            .field("scope", "ALL")
            .field("page", page)
            .field("page_size", 10)
            .build()
    }

    /// Every call fails with the given error.
    struct BrokenCache(fn() -> CacheError);

    #[async_trait]
    impl CachePort for BrokenCache {
        async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
            Err((self.0)())
        }

        async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), CacheError> {
            Err((self.0)())
        }

        async fn delete_by_prefix(&self, _prefix: &str) -> Result<u64, CacheError> {
            Err((self.0)())
        }
    }

    fn unavailable() -> CacheError {
        redis::RedisError::from((redis::ErrorKind::IoError, "connection refused")).into()
    }

    #[tokio::test]
    async fn stored_page_round_trips_unchanged() {
        let reader = CacheAsideReader::new(Arc::new(MemoryCache::new()));
        let key = cart_key(1, 1);
        let original = page(vec!["a".into(), "b".into()], 12);

        let computed = original.clone();
        let first: Result<_, CacheError> = reader
            .fetch_or_compute(&ctx(), &key, DEFAULT_TTL, || async move { Ok(computed) })
            .await;
        let cached: Result<PageResult<String>, CacheError> = reader
            .fetch_or_compute(&ctx(), &key, DEFAULT_TTL, || async { Err(CacheError::Timeout) })
            .await;

        assert_eq!(first.unwrap(), original);
        assert_eq!(cached.unwrap(), original);
    }

    #[tokio::test(start_paused = true)]
    async fn computes_once_until_ttl_expires() {
        let reader = CacheAsideReader::new(Arc::new(MemoryCache::new()));
        let key = cart_key(1, 1);
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let ttl = Duration::from_secs(30);

        for _ in 0..3 {
            let _: PageResult<String> = reader
                .fetch_or_compute(&ctx(), &key, ttl, || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, CacheError>(page(vec![], 0))
                })
                .await
                .unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(31)).await;
        let _: PageResult<String> = reader
            .fetch_or_compute(&ctx(), &key, ttl, || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, CacheError>(page(vec![], 0))
            })
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn corrupt_payload_is_an_error_not_a_miss() {
        let cache = MemoryCache::new();
        let key = cart_key(1, 1);
        cache.set(key.as_str(), "{not json", DEFAULT_TTL).await.unwrap();
        let reader = CacheAsideReader::new(Arc::new(cache));

        let result: Result<PageResult<String>, CacheError> = reader
            .fetch_or_compute(&ctx(), &key, DEFAULT_TTL, || async { Ok(page(vec![], 0)) })
            .await;

        assert_matches!(result, Err(CacheError::Serialization(_)));
    }

    #[tokio::test]
    async fn compute_error_is_returned_and_nothing_cached() {
        let cache = MemoryCache::new();
        let reader = CacheAsideReader::new(Arc::new(cache.clone()));

        let result: Result<PageResult<String>, CacheError> = reader
            .fetch_or_compute(&ctx(), &cart_key(1, 1), DEFAULT_TTL, || async {
                Err(CacheError::Timeout)
            })
            .await;

        assert_matches!(result, Err(CacheError::Timeout));
        assert!(cache.keys().await.is_empty());
    }

    #[tokio::test]
    async fn unreachable_backend_is_an_error_and_skips_compute() {
        let reader = CacheAsideReader::new(Arc::new(BrokenCache(unavailable)));
        let counter = AtomicUsize::new(0);
        let calls = &counter;

        let result: Result<PageResult<String>, CacheError> = reader
            .fetch_or_compute(&ctx(), &cart_key(1, 1), DEFAULT_TTL, || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(page(vec!["fresh".into()], 1))
            })
            .await;

        assert_matches!(result, Err(CacheError::Unavailable(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn lookup_timeout_is_an_error() {
        let reader = CacheAsideReader::new(Arc::new(BrokenCache(|| CacheError::Timeout)));

        let result: Result<PageResult<String>, CacheError> = reader
            .fetch_or_compute(&ctx(), &cart_key(1, 1), DEFAULT_TTL, || async {
                Ok(page(vec![], 0))
            })
            .await;

        assert_matches!(result, Err(CacheError::Timeout));
    }

    #[tokio::test]
    async fn invalidation_drops_every_variant_of_the_customer_cart() {
        let cache = MemoryCache::new();
        let reader = CacheAsideReader::new(Arc::new(cache.clone()));
        let invalidator = CacheInvalidator::new(Arc::new(cache.clone()));

        let keys = [cart_key(7, 1), cart_key(7, 2), cart_key(8, 1)];
        for key in &keys {
            let _: PageResult<String> = reader
                .fetch_or_compute(&ctx(), key, DEFAULT_TTL, || async {
                    Ok::<_, CacheError>(page(vec!["before".into()], 1))
                })
                .await
                .unwrap();
        }

        invalidator.invalidate(&ctx(), &[cart_prefix(7)]).await.unwrap();

        for key in &keys[..2] {
            let after: PageResult<String> = reader
                .fetch_or_compute(&ctx(), key, DEFAULT_TTL, || async {
                    Ok::<_, CacheError>(page(vec!["after".into()], 1))
                })
                .await
                .unwrap();
            assert_eq!(after.records, vec!["after".to_string()]);
        }
        let untouched: PageResult<String> = reader
            .fetch_or_compute(&ctx(), &keys[2], DEFAULT_TTL, || async {
                Ok::<_, CacheError>(page(vec!["after".into()], 1))
            })
            .await
            .unwrap();
        assert_eq!(untouched.records, vec!["before".to_string()]);
    }

    /// A reader that computed before a write but stores after its
    /// invalidation leaves a stale page behind; it lives until the TTL.
    #[tokio::test(start_paused = true)]
    async fn stale_repopulation_after_invalidation_is_bounded_by_ttl() {
        let cache = MemoryCache::new();
        let reader = CacheAsideReader::new(Arc::new(cache.clone()));
        let invalidator = CacheInvalidator::new(Arc::new(cache.clone()));
        let key = cart_key(7, 1);
        let ttl = Duration::from_secs(60);

        // Slow reader computed the old page; the write commits and invalidates
        // before that reader gets to store it.
        invalidator.invalidate(&ctx(), &[cart_prefix(7)]).await.unwrap();
        let stale = serde_json::to_string(&page(vec!["before".into()], 1)).unwrap();
        cache.set(key.as_str(), &stale, ttl).await.unwrap();

        let read: PageResult<String> = reader
            .fetch_or_compute(&ctx(), &key, ttl, || async {
                Ok::<_, CacheError>(page(vec!["after".into()], 1))
            })
            .await
            .unwrap();
        assert_eq!(read.records, vec!["before".to_string()]);

        tokio::time::advance(ttl + Duration::from_secs(1)).await;

        let read: PageResult<String> = reader
            .fetch_or_compute(&ctx(), &key, ttl, || async {
                Ok::<_, CacheError>(page(vec!["after".into()], 1))
            })
            .await
            .unwrap();
        assert_eq!(read.records, vec!["after".to_string()]);
    }
}
