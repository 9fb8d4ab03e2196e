//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `MRP_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::collections::HashSet;
use std::env;
use std::time::Duration;

use reqwest::Url;

use crate::constants::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL, DEFAULT_PROVIDER_BACKOFF, DEFAULT_PROVIDER_RETRIES,
    DEFAULT_PROVIDER_TIMEOUT, DEFAULT_SOURCE_WEIGHT,
};
use crate::matching::SourceWeights;
use crate::provider::{ProviderConfig, ResponseFormat, RetryPolicy};

/// One `id:format:url` entry of `MRP_PROVIDERS`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderEntry {
    pub id: String,
    pub format: ResponseFormat,
    pub search_url: String,
}

/// Engine configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `MRP_*` overrides on top of defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Max entries in the in-memory quote cache. Default: `10_000`.
    pub cache_capacity: u64,

    /// Lifetime of a cached provider answer. Default: 24 hours.
    pub cache_ttl: Duration,

    /// Per-attempt provider timeout. Default: 8 seconds.
    pub provider_timeout: Duration,

    /// Retries after the first attempt. Default: `2`.
    pub provider_retries: u32,

    /// Linear backoff unit between attempts. Default: 1 second.
    pub provider_backoff: Duration,

    /// Registered sources, in declaration order.
    pub providers: Vec<ProviderEntry>,

    /// Per-source reliability weights.
    pub source_weights: Vec<(String, f64)>,

    /// Weight of sources missing from `source_weights`. Default: `0.20`.
    pub default_source_weight: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_ttl: DEFAULT_CACHE_TTL,
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
            provider_retries: DEFAULT_PROVIDER_RETRIES,
            provider_backoff: DEFAULT_PROVIDER_BACKOFF,
            providers: Vec::new(),
            source_weights: Vec::new(),
            default_source_weight: DEFAULT_SOURCE_WEIGHT,
        }
    }
}

impl Config {
    const ENV_CACHE_CAPACITY: &'static str = "MRP_CACHE_CAPACITY";
    const ENV_CACHE_TTL_SECS: &'static str = "MRP_CACHE_TTL_SECS";
    const ENV_PROVIDER_TIMEOUT_SECS: &'static str = "MRP_PROVIDER_TIMEOUT_SECS";
    const ENV_PROVIDER_RETRIES: &'static str = "MRP_PROVIDER_RETRIES";
    const ENV_PROVIDER_BACKOFF_MS: &'static str = "MRP_PROVIDER_BACKOFF_MS";
    const ENV_PROVIDERS: &'static str = "MRP_PROVIDERS";
    const ENV_SOURCE_WEIGHTS: &'static str = "MRP_SOURCE_WEIGHTS";
    const ENV_DEFAULT_SOURCE_WEIGHT: &'static str = "MRP_DEFAULT_SOURCE_WEIGHT";

    /// Loads configuration from environment variables (falling back to defaults).
    ///
    /// Unparseable numbers fall back to their defaults; malformed provider or weight lists
    /// are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let cache_capacity = Self::parse_from_env(Self::ENV_CACHE_CAPACITY, defaults.cache_capacity);
        let cache_ttl = Duration::from_secs(Self::parse_from_env(
            Self::ENV_CACHE_TTL_SECS,
            defaults.cache_ttl.as_secs(),
        ));
        let provider_timeout = Duration::from_secs(Self::parse_from_env(
            Self::ENV_PROVIDER_TIMEOUT_SECS,
            defaults.provider_timeout.as_secs(),
        ));
        let provider_retries =
            Self::parse_from_env(Self::ENV_PROVIDER_RETRIES, defaults.provider_retries);
        let provider_backoff = Duration::from_millis(Self::parse_from_env(
            Self::ENV_PROVIDER_BACKOFF_MS,
            defaults.provider_backoff.as_millis() as u64,
        ));
        let default_source_weight = Self::parse_from_env(
            Self::ENV_DEFAULT_SOURCE_WEIGHT,
            defaults.default_source_weight,
        );

        let providers = match Self::read_list(Self::ENV_PROVIDERS) {
            Some(raw) => parse_providers(&raw)?,
            None => defaults.providers,
        };
        let source_weights = match Self::read_list(Self::ENV_SOURCE_WEIGHTS) {
            Some(raw) => parse_weights(&raw)?,
            None => defaults.source_weights,
        };

        Ok(Self {
            cache_capacity,
            cache_ttl,
            provider_timeout,
            provider_retries,
            provider_backoff,
            providers,
            source_weights,
            default_source_weight,
        })
    }

    /// Checks weights, URLs, the timeout and provider id uniqueness.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }

        check_weight("default", self.default_source_weight)?;
        for (source_id, weight) in &self.source_weights {
            check_weight(source_id, *weight)?;
        }

        let mut seen = HashSet::new();
        for entry in &self.providers {
            if !seen.insert(entry.id.as_str()) {
                return Err(ConfigError::DuplicateProvider {
                    id: entry.id.clone(),
                });
            }
            Url::parse(&entry.search_url).map_err(|e| ConfigError::InvalidProviderUrl {
                id: entry.id.clone(),
                url: entry.search_url.clone(),
                reason: e.to_string(),
            })?;
        }

        Ok(())
    }

    /// Retry schedule shared by every provider.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            timeout: self.provider_timeout,
            retries: self.provider_retries,
            backoff: self.provider_backoff,
        }
    }

    /// Provider configurations ready for [`crate::provider::build_providers`].
    pub fn provider_configs(&self) -> Vec<ProviderConfig> {
        self.providers
            .iter()
            .map(|entry| {
                ProviderConfig::new(entry.id.as_str(), entry.search_url.as_str())
                    .format(entry.format)
                    .retry(self.retry_policy())
                    .cache_ttl(self.cache_ttl)
            })
            .collect()
    }

    /// Weight table for the matching cascade.
    pub fn source_weights(&self) -> SourceWeights {
        self.source_weights
            .iter()
            .fold(SourceWeights::new(self.default_source_weight), |table, (id, w)| {
                table.with(id, *w)
            })
    }

    fn read_list(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_from_env<T: std::str::FromStr>(var_name: &str, default: T) -> T {
        env::var(var_name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }
}

fn check_weight(source_id: &str, weight: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&weight) {
        Ok(())
    } else {
        Err(ConfigError::WeightOutOfRange {
            source_id: source_id.to_string(),
            weight,
        })
    }
}

/// Parses `id:format:url[,id:format:url...]`. The URL keeps any further colons.
pub fn parse_providers(raw: &str) -> Result<Vec<ProviderEntry>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let invalid = |reason: &str| ConfigError::InvalidProviderEntry {
                entry: entry.to_string(),
                reason: reason.to_string(),
            };

            let mut parts = entry.splitn(3, ':');
            let id = parts.next().map(str::trim).unwrap_or_default();
            let format = parts.next().map(str::trim).unwrap_or_default();
            let search_url = parts.next().map(str::trim).unwrap_or_default();

            if id.is_empty() || search_url.is_empty() {
                return Err(invalid("expected id:format:url"));
            }
            let format = format.parse::<ResponseFormat>().map_err(|e| invalid(&e))?;

            Ok(ProviderEntry {
                id: id.to_string(),
                format,
                search_url: search_url.to_string(),
            })
        })
        .collect()
}

/// Parses `id=weight[,id=weight...]`.
pub fn parse_weights(raw: &str) -> Result<Vec<(String, f64)>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let invalid = || ConfigError::InvalidWeightEntry {
                entry: entry.to_string(),
            };
            let (id, weight) = entry.split_once('=').ok_or_else(invalid)?;
            let id = id.trim();
            if id.is_empty() {
                return Err(invalid());
            }
            let weight: f64 = weight.trim().parse().map_err(|_| invalid())?;
            Ok((id.to_string(), weight))
        })
        .collect()
}
