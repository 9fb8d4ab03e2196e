//! In-memory [`QuoteCache`] backed by moka with per-entry expiry.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::sync::Cache;

use super::error::CacheResult;
use super::quote::QuoteCache;
use crate::constants::DEFAULT_CACHE_CAPACITY;

#[derive(Debug, Clone)]
struct CachedText {
    text: Arc<str>,
    ttl: Duration,
}

struct PerEntryTtl;

impl Expiry<String, CachedText> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedText,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedText,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Bounded in-process cache; shared by cloning (the handle is `Arc`-backed).
#[derive(Clone)]
pub struct MemoryQuoteCache {
    entries: Cache<String, CachedText>,
}

impl MemoryQuoteCache {
    /// Creates a cache with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Creates a cache with a max entry capacity (LRU eviction).
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(capacity)
                .expire_after(PerEntryTtl)
                .build(),
        }
    }

    /// Returns the (approximate) number of live entries.
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.entry_count() == 0
    }

    pub fn clear(&self) {
        self.entries.invalidate_all();
    }

    /// Runs pending eviction work so `len` reflects recent writes.
    pub fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks();
    }
}

impl Default for MemoryQuoteCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryQuoteCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryQuoteCache")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

#[async_trait]
impl QuoteCache for MemoryQuoteCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.entries.get(key).map(|cached| cached.text.to_string()))
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> CacheResult<()> {
        self.entries.insert(
            key.to_string(),
            CachedText {
                text: Arc::from(value),
                ttl,
            },
        );
        Ok(())
    }
}
