//! Key-value interface the providers cache their lookups behind.

use std::time::Duration;

use async_trait::async_trait;

use super::error::CacheResult;

#[async_trait]
/// String-keyed text store with per-key expiry.
///
/// Only atomic single-key `get`/`set` is required; no multi-key consistency.
pub trait QuoteCache: Send + Sync {
    /// Returns the live value for `key`, if any.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores `value` under `key` for `ttl`, replacing any previous value.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> CacheResult<()>;
}
