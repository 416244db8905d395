#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The cache server could not be reached or rejected the command.
    #[error("Cache unavailable: {0}")]
    Unavailable(#[from] redis::RedisError),

    /// A cached payload could not be decoded, or a value could not be encoded.
    #[error("Cache payload error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The request deadline elapsed during a cache round-trip.
    #[error("Cache operation exceeded the request deadline")]
    Timeout,
}

impl From<storefront_core::context::DeadlineExceeded> for CacheError {
    fn from(_: storefront_core::context::DeadlineExceeded) -> Self {
        CacheError::Timeout
    }
}
