use std::sync::Arc;

use storefront_core::context::RequestContext;

use crate::error::CacheError;
use crate::port::CachePort;

/// Drops every cached variant of one or more collections.
#[derive(Clone)]
pub struct CacheInvalidator {
    cache: Arc<dyn CachePort>,
}

impl CacheInvalidator {
    pub fn new(cache: Arc<dyn CachePort>) -> Self {
        Self { cache }
    }

    /// Delete all keys under each prefix.
    ///
    /// Every prefix is attempted even if an earlier one fails; deletions that
    /// succeeded stay done. Returns the total removed, or the first error.
    pub async fn invalidate<S: AsRef<str>>(
        &self,
        ctx: &RequestContext,
        prefixes: &[S],
    ) -> Result<u64, CacheError> {
        let mut removed = 0;
        let mut first_error = None;

        for prefix in prefixes {
            let prefix = prefix.as_ref();
            let outcome = match ctx.within(self.cache.delete_by_prefix(prefix)).await {
                Ok(outcome) => outcome,
                Err(deadline) => Err(deadline.into()),
            };
            match outcome {
                Ok(n) => removed += n,
                Err(err) => {
                    tracing::debug!(prefix, error = %err, "Cache invalidation failed");
                    first_error.get_or_insert(err);
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => {
                tracing::debug!(trace_id = %ctx.trace_id(), removed, "Cache invalidated");
                Ok(removed)
            }
        }
    }
}
