use std::time::Duration;

use thiserror::Error;

/// Provider construction or per-attempt failure.
///
/// Attempt failures never leave the provider: exhausted retries surface as "no candidate".
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("unexpected HTTP status {status}")]
    Status { status: u16 },

    #[error("invalid CSS selector '{selector}'")]
    InvalidSelector { selector: String },

    #[error("invalid search url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

pub type ProviderResult<T> = Result<T, ProviderError>;
