//! MRP price verification engine (used by the CLI binary and integration tests).
//!
//! Given a seller-submitted product and price, the engine queries external reference
//! sources concurrently, matches their listings against the product, normalizes prices
//! to the submitted pack size, filters outliers and classifies the submitted price as
//! approved, warning or rejected.
//!
//! # Public API Surface
//!
//! ## Entry Point
//! - [`PriceVerifier`] - `verify(request) -> VerificationResult`
//! - [`VerificationRequest`], [`VerificationResult`] - closed request/result records
//!
//! ## Pipeline Stages
//! - [`Aggregator`] - concurrent fan-out over [`SourceProvider`]s
//! - [`MatchingCascade`], [`SourceWeights`] - staged product matching
//! - [`build_consensus`] - outlier-filtered consensus price
//! - [`DecisionPolicy`] - approve/warn/reject thresholds
//!
//! ## Sources & Caching
//! - [`HttpProvider`], [`ProviderConfig`] - HTTP sources with retries
//! - [`QuoteCache`], [`MemoryQuoteCache`] - per-key TTL cache behind providers
//!
//! ## Test/Mock Support
//! Mock providers are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod aggregate;
pub mod cache;
pub mod config;
pub mod constants;
pub mod decision;
pub mod hashing;
pub mod matching;
pub mod model;
pub mod pricing;
pub mod provider;
pub mod similarity;
pub mod text;
pub mod verify;

pub use aggregate::Aggregator;
pub use cache::{CacheError, CacheResult, MemoryQuoteCache, QuoteCache};
pub use config::{Config, ConfigError, ProviderEntry};
pub use decision::{DecisionPolicy, Verdict};
pub use hashing::cache_key;
pub use matching::{CascadeOutcome, MatchingCascade, SourceWeights};
pub use model::{
    CandidateProduct, MatchStage, MatchedReference, RequestBuilder, RequestError,
    VerificationRequest, VerificationResult, VerificationStatus,
};
pub use pricing::{MarketConsensus, PricingError, build_consensus, normalize_price};
pub use provider::{
    HttpProvider, ProviderConfig, ProviderError, ResponseFormat, RetryPolicy, SourceProvider,
    build_providers,
};
#[cfg(any(test, feature = "mock"))]
pub use provider::{PanickingProvider, StaticProvider};
pub use similarity::{composite_similarity, edit_similarity};
pub use text::{extract_pack_quantity, normalize_name};
pub use verify::{Fallback, PriceVerifier, VerifyError};
