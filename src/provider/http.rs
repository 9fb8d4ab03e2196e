//! HTTP-backed [`SourceProvider`] with cache short-circuit and bounded retries.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Url};
use tracing::{debug, warn};

use super::SourceProvider;
use super::config::ProviderConfig;
use super::error::{ProviderError, ProviderResult};
use super::parse::{JsonListingParser, ListingParser, MarkupListingParser, MarkupSelectors};
use crate::cache::{CacheResult, QuoteCache};
use crate::hashing::cache_key;
use crate::model::CandidateProduct;

/// Queries one search endpoint and parses the first well-formed listing.
pub struct HttpProvider {
    config: ProviderConfig,
    url: Url,
    http: HttpClient,
    cache: Arc<dyn QuoteCache>,
    parser: Box<dyn ListingParser>,
}

impl std::fmt::Debug for HttpProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpProvider")
            .field("id", &self.config.id)
            .field("url", &self.url.as_str())
            .field("format", &self.config.format)
            .finish()
    }
}

impl HttpProvider {
    /// Creates a provider with an explicit parser.
    pub fn new(
        config: ProviderConfig,
        cache: Arc<dyn QuoteCache>,
        parser: Box<dyn ListingParser>,
    ) -> ProviderResult<Self> {
        let url = Url::parse(&config.search_url).map_err(|e| ProviderError::InvalidUrl {
            url: config.search_url.clone(),
            reason: e.to_string(),
        })?;
        let http = HttpClient::builder()
            .timeout(config.retry.timeout)
            .build()
            .map_err(ProviderError::Transport)?;

        Ok(Self {
            config,
            url,
            http,
            cache,
            parser,
        })
    }

    /// Creates a provider for a JSON search API.
    pub fn json(config: ProviderConfig, cache: Arc<dyn QuoteCache>) -> ProviderResult<Self> {
        Self::new(config, cache, Box::new(JsonListingParser::new()))
    }

    /// Creates a provider for an HTML results page.
    pub fn markup(
        config: ProviderConfig,
        cache: Arc<dyn QuoteCache>,
        selectors: &MarkupSelectors,
    ) -> ProviderResult<Self> {
        let parser = MarkupListingParser::new(selectors)?;
        Self::new(config, cache, Box::new(parser))
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn cached(&self, key: &str) -> Option<CandidateProduct> {
        match self.read_cached(key).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!(source = %self.config.id, error = %e, "Cache lookup failed, treating as miss");
                None
            }
        }
    }

    async fn read_cached(&self, key: &str) -> CacheResult<Option<CandidateProduct>> {
        let Some(text) = self.cache.get(key).await? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&text)?))
    }

    async fn store(&self, key: &str, candidate: &CandidateProduct) {
        if let Err(e) = self.write_cached(key, candidate).await {
            warn!(source = %self.config.id, error = %e, "Cache write failed");
        }
    }

    async fn write_cached(&self, key: &str, candidate: &CandidateProduct) -> CacheResult<()> {
        let text = serde_json::to_string(candidate)?;
        self.cache.set(key, text, self.config.cache_ttl).await
    }

    async fn attempt(&self, query: &str) -> ProviderResult<String> {
        let resp = self
            .http
            .get(self.url.clone())
            .query(&[(self.config.query_param.as_str(), query.trim())])
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        if !resp.status().is_success() {
            return Err(ProviderError::Status {
                status: resp.status().as_u16(),
            });
        }

        resp.text().await.map_err(|e| self.classify(e))
    }

    fn classify(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout(self.config.retry.timeout)
        } else {
            ProviderError::Transport(e)
        }
    }

    async fn fetch_with_retries(&self, query: &str) -> Option<String> {
        let policy = &self.config.retry;
        let mut attempt = 0u32;
        loop {
            attempt += 1;

            match self.attempt(query).await {
                Ok(body) => return Some(body),
                Err(e) if attempt >= policy.max_attempts() => {
                    warn!(
                        source = %self.config.id,
                        attempts = attempt,
                        error = %e,
                        "Provider unreachable, giving up"
                    );
                    return None;
                }
                Err(e) => {
                    let wait = policy.backoff_for(attempt);
                    debug!(
                        source = %self.config.id,
                        attempt,
                        error = %e,
                        backoff_ms = wait.as_millis() as u64,
                        "Provider attempt failed, retrying"
                    );
                    tokio::time::sleep(wait).await;
                }
            }
        }
    }
}

#[async_trait]
impl SourceProvider for HttpProvider {
    fn id(&self) -> &str {
        &self.config.id
    }

    async fn fetch(&self, query: &str) -> Option<CandidateProduct> {
        let key = cache_key(&self.config.id, query);

        if let Some(hit) = self.cached(&key).await {
            debug!(source = %self.config.id, "Cache hit");
            return Some(hit);
        }
        debug!(source = %self.config.id, "Cache miss, querying source");

        let body = self.fetch_with_retries(query).await?;
        let Some(candidate) = self.parser.parse(&self.config.id, &body) else {
            debug!(source = %self.config.id, body_len = body.len(), "No well-formed listing in response");
            return None;
        };

        self.store(&key, &candidate).await;
        Some(candidate)
    }
}
