use thiserror::Error;

use crate::model::RequestError;

/// Failures `verify` reports to its caller instead of folding into a verdict.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The request failed boundary validation.
    #[error("invalid verification request: {0}")]
    InvalidRequest(#[from] RequestError),
}

/// Convenience result type for verification.
pub type VerifyResult<T> = Result<T, VerifyError>;
