//! External reference sources.
//!
//! Each source answers a query with at most one [`CandidateProduct`]. Failures of any kind
//! (timeouts, HTTP errors, unparseable bodies) are absorbed and reported as `None`; they
//! never reach the aggregator as errors.
//!
//! [`HttpProvider`] implements the full contract: cache lookup keyed by
//! `(source id, normalized query)`, one request per attempt with a per-attempt timeout,
//! linear-backoff retries, and a cache write on success.

pub mod config;
pub mod error;
pub mod factory;
pub mod http;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod parse;


use async_trait::async_trait;

use crate::model::CandidateProduct;

pub use config::{DEFAULT_QUERY_PARAM, ProviderConfig, ResponseFormat, RetryPolicy};
pub use error::{ProviderError, ProviderResult};
pub use factory::{build_provider, build_providers};
pub use http::HttpProvider;
#[cfg(any(test, feature = "mock"))]
pub use mock::{PanickingProvider, StaticProvider};
pub use parse::{
    JsonListingParser, ListingParser, MarkupListingParser, MarkupSelectors, parse_price_text,
};

#[async_trait]
/// One external reference source.
pub trait SourceProvider: Send + Sync {
    /// Stable source id (cache scope and weight-table key).
    fn id(&self) -> &str;

    /// Best-guess candidate for `query`, or `None` when the source has nothing usable.
    async fn fetch(&self, query: &str) -> Option<CandidateProduct>;
}
