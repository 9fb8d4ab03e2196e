use std::time::Duration;

use crate::constants::{
    DEFAULT_CACHE_TTL, DEFAULT_PROVIDER_BACKOFF, DEFAULT_PROVIDER_RETRIES, DEFAULT_PROVIDER_TIMEOUT,
};

/// Default query-string parameter carrying the search text.
pub const DEFAULT_QUERY_PARAM: &str = "q";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// How a source's search response is laid out.
pub enum ResponseFormat {
    #[default]
    /// JSON listing (`{"products": [...]}`, `{"results": [...]}` or a bare array).
    Json,
    /// HTML listing page scraped with CSS selectors.
    Markup,
}

impl std::str::FromStr for ResponseFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "markup" | "html" => Ok(Self::Markup),
            _ => Err(format!("Unknown response format: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Bounded retry schedule: `1 + retries` attempts, retry `n` sleeps `n × backoff`.
pub struct RetryPolicy {
    pub timeout: Duration,
    pub retries: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_PROVIDER_TIMEOUT,
            retries: DEFAULT_PROVIDER_RETRIES,
            backoff: DEFAULT_PROVIDER_BACKOFF,
        }
    }
}

impl RetryPolicy {
    /// Total attempts including the first.
    #[inline]
    pub fn max_attempts(&self) -> u32 {
        self.retries + 1
    }

    /// Sleep before the given retry (1-based).
    #[inline]
    pub fn backoff_for(&self, retry: u32) -> Duration {
        self.backoff * retry
    }
}

#[derive(Debug, Clone, PartialEq)]
/// One external reference source.
pub struct ProviderConfig {
    /// Stable source id; keys the cache and the weight table.
    pub id: String,
    /// Search endpoint; the query is appended as `?{query_param}=...`.
    pub search_url: String,
    pub query_param: String,
    pub format: ResponseFormat,
    pub retry: RetryPolicy,
    /// How long a successful lookup stays cached.
    pub cache_ttl: Duration,
}

impl ProviderConfig {
    pub fn new(id: impl Into<String>, search_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            search_url: search_url.into(),
            query_param: DEFAULT_QUERY_PARAM.to_string(),
            format: ResponseFormat::default(),
            retry: RetryPolicy::default(),
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    pub fn format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }

    pub fn query_param(mut self, param: &str) -> Self {
        self.query_param = param.to_string();
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }
}
