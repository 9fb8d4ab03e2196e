use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by a [`QuoteCache`](super::QuoteCache) backend.
pub enum CacheError {
    /// The backing store could not be reached or rejected the operation.
    #[error("cache backend error: {reason}")]
    Backend {
        /// Error message.
        reason: String,
    },

    /// A cached value could not be encoded or decoded.
    #[error("cache serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
