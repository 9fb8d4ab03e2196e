use thiserror::Error;

/// Malformed [`VerificationRequest`](super::VerificationRequest).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("product name must not be blank")]
    BlankProductName,

    #[error("product name {name:?} has no letters or digits to match on")]
    UnmatchableProductName { name: String },

    #[error("submitted price {price} must be a finite positive amount")]
    InvalidPrice { price: f64 },
}
