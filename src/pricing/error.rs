use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
/// Reasons no consensus price could be formed.
pub enum PricingError {
    /// No references to aggregate.
    #[error("no prices to aggregate")]
    NoPrices,

    /// Every price deviated too far from the median.
    #[error("all prices were outliers around median {median}")]
    AllOutliers { median: f64 },

    /// Every reference normalized to a zero (sub-cent) or non-finite price.
    #[error("none of the {dropped} references carries a usable price")]
    UnpricedReferences { dropped: usize },
}

/// Convenience result type for pricing operations.
pub type PricingResult<T> = Result<T, PricingError>;
