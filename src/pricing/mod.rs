//! Pack-size price normalization and the outlier-filtered market consensus.
//!
//! The consensus blends the filtered median and mean, `(median + mean) / 2`, which damps
//! both small-sample median noise and single-outlier mean skew.

pub mod error;


use std::cmp::Ordering;

use tracing::debug;

use crate::constants::{OUTLIER_DEVIATION, round2};
use crate::model::MatchedReference;

pub use error::{PricingError, PricingResult};

/// Rescales a listed price to the target pack size: `listed / source × target`, in cents.
pub fn normalize_price(listed_price: f64, source_quantity: u32, target_quantity: u32) -> f64 {
    let source = source_quantity.max(1) as f64;
    round2(listed_price / source * target_quantity.max(1) as f64)
}

/// Median (mean of the middle pair for even counts).
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// `true` when `price` deviates from `median` by more than the outlier fraction.
#[inline]
pub fn is_outlier(price: f64, median: f64) -> bool {
    ((price - median) / median).abs() > OUTLIER_DEVIATION
}

/// Consensus market price over the references that survived outlier filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketConsensus {
    /// `(filtered median + filtered mean) / 2`, in cents.
    pub consensus_price: f64,
    /// `Σ(match score × source weight)` over survivors, rounded to 2 places.
    pub confidence_score: f64,
    pub filtered_median: f64,
    pub filtered_mean: f64,
    /// References kept after filtering, in input order.
    pub references: Vec<MatchedReference>,
    /// How many references were discarded as outliers.
    pub discarded: usize,
}

/// `true` when the normalized price can take part in the median.
#[inline]
pub fn is_priced(reference: &MatchedReference) -> bool {
    reference.normalized_price.is_finite() && reference.normalized_price > 0.0
}

/// Filters outliers around the median and computes the consensus.
///
/// References whose normalized price is not a positive amount (a sub-cent unit price
/// rounds to `0.00`) are dropped before the median and counted as discarded.
pub fn build_consensus(references: Vec<MatchedReference>) -> PricingResult<MarketConsensus> {
    if references.is_empty() {
        return Err(PricingError::NoPrices);
    }
    let total = references.len();
    let (priced, unpriced): (Vec<MatchedReference>, Vec<MatchedReference>) =
        references.into_iter().partition(is_priced);
    if !unpriced.is_empty() {
        debug!(dropped = unpriced.len(), "Dropped references without a usable price");
    }

    let prices: Vec<f64> = priced.iter().map(|r| r.normalized_price).collect();
    let initial_median =
        median(&prices).ok_or(PricingError::UnpricedReferences { dropped: total })?;

    let survivors: Vec<MatchedReference> = priced
        .into_iter()
        .filter(|r| !is_outlier(r.normalized_price, initial_median))
        .collect();
    let discarded = total - survivors.len();

    if survivors.is_empty() {
        return Err(PricingError::AllOutliers {
            median: initial_median,
        });
    }

    let kept: Vec<f64> = survivors.iter().map(|r| r.normalized_price).collect();
    // Non-empty: checked above.
    let filtered_median = median(&kept).ok_or(PricingError::NoPrices)?;
    let filtered_mean = mean(&kept).ok_or(PricingError::NoPrices)?;

    let consensus_price = round2((filtered_median + filtered_mean) / 2.0);
    let confidence_score = round2(
        survivors
            .iter()
            .map(|r| r.match_score * r.source_weight)
            .sum::<f64>(),
    );

    debug!(
        initial_median,
        filtered_median,
        filtered_mean,
        consensus_price,
        discarded,
        "Market consensus computed"
    );

    Ok(MarketConsensus {
        consensus_price,
        confidence_score,
        filtered_median,
        filtered_mean,
        references: survivors,
        discarded,
    })
}
