//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// An `MRP_PROVIDERS` entry is not `id:format:url`.
    #[error("invalid provider entry '{entry}': {reason}")]
    InvalidProviderEntry { entry: String, reason: String },

    /// An `MRP_SOURCE_WEIGHTS` entry is not `id=weight`.
    #[error("invalid source weight entry '{entry}': expected id=weight")]
    InvalidWeightEntry { entry: String },

    /// A source weight lies outside `[0, 1]`.
    #[error("source weight for '{source_id}' must be within [0, 1], got {weight}")]
    WeightOutOfRange { source_id: String, weight: f64 },

    /// A provider search URL does not parse.
    #[error("provider '{id}' has an invalid search URL '{url}': {reason}")]
    InvalidProviderUrl {
        id: String,
        url: String,
        reason: String,
    },

    /// Providers would never get an answer in time.
    #[error("provider timeout must be greater than zero")]
    ZeroTimeout,

    /// Two providers share an id, so their cache scopes and weights would collide.
    #[error("duplicate provider id: {id}")]
    DuplicateProvider { id: String },
}
