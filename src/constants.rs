//! Cross-cutting, shared constants.
//!
//! Thresholds here are fixed policy. Runtime-tunable values (timeouts, retries, cache
//! sizing, source weights) live in [`crate::config::Config`] and only default to these.

use std::time::Duration;

/// Submitted prices up to `consensus × (1 + TOLERANCE)` are approved outright.
pub const PRICE_TOLERANCE: f64 = 0.03;

/// Maximum markup over consensus before a listing is rejected.
pub const MAX_MARKUP: f64 = 0.05;

/// Normalized prices deviating from the median by more than this fraction are outliers.
pub const OUTLIER_DEVIATION: f64 = 0.30;

/// Minimum composite similarity for the strong-similarity stage.
pub const STRONG_SIMILARITY_THRESHOLD: f64 = 0.75;

/// Minimum formula similarity for the formula-lookup stage.
pub const FORMULA_SIMILARITY_THRESHOLD: f64 = 0.8;

/// Fixed match score assigned to formula-lookup references.
pub const FORMULA_MATCH_SCORE: f64 = 0.8;

/// Penalty applied to name similarity for industry-average references.
pub const FALLBACK_SCORE_PENALTY: f64 = 0.5;

/// Max references kept by the ranked stages.
pub const MAX_RANKED_REFERENCES: usize = 3;

/// Composite similarity weights (name, formula, manufacturer).
pub const NAME_WEIGHT: f64 = 0.5;
pub const FORMULA_WEIGHT: f64 = 0.3;
pub const MANUFACTURER_WEIGHT: f64 = 0.2;

/// Reliability weight for sources missing from the weight table.
pub const DEFAULT_SOURCE_WEIGHT: f64 = 0.20;

/// Provider cache entries live for 24 hours.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Default in-memory cache capacity (entries).
pub const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

/// Per-attempt provider HTTP timeout.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(8);

/// Retries after the first provider attempt.
pub const DEFAULT_PROVIDER_RETRIES: u32 = 2;

/// Linear backoff unit: retry `n` waits `n × unit`.
pub const DEFAULT_PROVIDER_BACKOFF: Duration = Duration::from_secs(1);

/// Rounds to two decimal places (currency cents).
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
