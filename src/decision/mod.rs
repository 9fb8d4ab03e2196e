//! Approve / warn / reject classification against the consensus price.
//!
//! Limits are the exact products `consensus × (1 + fraction)`, compared with a
//! [`LIMIT_EPSILON`] slack. Only the reported `max_allowed_price` is rounded to cents.

use tracing::debug;

use crate::constants::{MAX_MARKUP, PRICE_TOLERANCE, round2};
use crate::model::VerificationStatus;

/// Percent-difference text when there is no consensus to compare against.
pub const NO_MARKET_AVERAGE_TEXT: &str = "market average unavailable";

/// Slack absorbing float error in `consensus × (1 + fraction)`.
pub const LIMIT_EPSILON: f64 = 1e-9;

/// Classification of one submitted price.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub status: VerificationStatus,
    pub max_allowed_price: f64,
    pub reason_text: String,
    pub percent_difference_text: String,
    pub needs_admin_review: bool,
}

/// Tolerance and markup ceiling, as fractions of the consensus price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionPolicy {
    pub tolerance: f64,
    pub max_markup: f64,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self {
            tolerance: PRICE_TOLERANCE,
            max_markup: MAX_MARKUP,
        }
    }
}

impl DecisionPolicy {
    /// Highest price approved without review (unrounded).
    pub fn approve_limit(&self, consensus_price: f64) -> f64 {
        consensus_price * (1.0 + self.tolerance)
    }

    /// Highest price accepted at all, with review (unrounded).
    pub fn max_allowed(&self, consensus_price: f64) -> f64 {
        consensus_price * (1.0 + self.max_markup)
    }

    pub fn decide(&self, submitted_price: f64, consensus_price: f64) -> Verdict {
        let approve_limit = self.approve_limit(consensus_price);
        let markup_limit = self.max_allowed(consensus_price);
        let max_allowed_price = round2(markup_limit);
        let difference = percent_difference(submitted_price, consensus_price);
        let percent_difference_text = percent_difference_text(submitted_price, consensus_price);

        let (status, reason_text) = if submitted_price <= approve_limit + LIMIT_EPSILON {
            let reason = if difference <= 0.0 {
                "Submitted price is at or below the market average".to_string()
            } else {
                format!(
                    "Submitted price is within {:.0}% of the market average",
                    self.tolerance * 100.0
                )
            };
            (VerificationStatus::Approved, reason)
        } else if submitted_price <= markup_limit + LIMIT_EPSILON {
            (
                VerificationStatus::Warning,
                format!(
                    "Submitted price is {:.2}% above the market average",
                    difference
                ),
            )
        } else {
            (
                VerificationStatus::Rejected,
                format!(
                    "Submitted price exceeds the {:.0}% allowed margin over the market average",
                    self.max_markup * 100.0
                ),
            )
        };

        debug!(
            submitted_price,
            consensus_price,
            approve_limit,
            markup_limit,
            status = %status,
            "Price classified"
        );

        Verdict {
            status,
            max_allowed_price,
            reason_text,
            percent_difference_text,
            needs_admin_review: status != VerificationStatus::Approved,
        }
    }
}

/// Signed percentage of `submitted` over `consensus` (`0.0` without a consensus).
pub fn percent_difference(submitted_price: f64, consensus_price: f64) -> f64 {
    if consensus_price <= 0.0 {
        return 0.0;
    }
    (submitted_price - consensus_price) / consensus_price * 100.0
}

/// `"4.00% higher than market average"` / `"2.50% lower than market average"`.
pub fn percent_difference_text(submitted_price: f64, consensus_price: f64) -> String {
    if consensus_price <= 0.0 {
        return NO_MARKET_AVERAGE_TEXT.to_string();
    }
    let difference = percent_difference(submitted_price, consensus_price);
    let direction = if difference >= 0.0 { "higher" } else { "lower" };
    format!("{:.2}% {} than market average", difference.abs(), direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decide(submitted: f64, consensus: f64) -> Verdict {
        DecisionPolicy::default().decide(submitted, consensus)
    }

    #[test]
    fn test_boundaries_at_consensus_100() {
        assert_eq!(decide(103.0, 100.0).status, VerificationStatus::Approved);
        assert_eq!(decide(103.01, 100.0).status, VerificationStatus::Warning);
        assert_eq!(decide(104.0, 100.0).status, VerificationStatus::Warning);
        assert_eq!(decide(105.0, 100.0).status, VerificationStatus::Warning);
        assert_eq!(decide(105.01, 100.0).status, VerificationStatus::Rejected);
        assert_eq!(decide(106.0, 100.0).status, VerificationStatus::Rejected);
    }

    #[test]
    fn test_boundaries_at_uneven_consensus() {
        // 29.17 × 1.03 = 30.0451, 29.17 × 1.05 = 30.6285
        assert_eq!(decide(30.04, 29.17).status, VerificationStatus::Approved);
        assert_eq!(decide(30.05, 29.17).status, VerificationStatus::Warning);
        assert_eq!(decide(30.62, 29.17).status, VerificationStatus::Warning);
        assert_eq!(decide(30.63, 29.17).status, VerificationStatus::Rejected);
        assert_eq!(decide(30.63, 29.17).max_allowed_price, 30.63);
    }

    #[test]
    fn test_max_allowed_price() {
        assert_eq!(decide(100.0, 100.0).max_allowed_price, 105.0);
        assert_eq!(decide(30.0, 29.17).max_allowed_price, 30.63);
    }

    #[test]
    fn test_review_flags() {
        assert!(!decide(90.0, 100.0).needs_admin_review);
        assert!(decide(104.0, 100.0).needs_admin_review);
        assert!(decide(200.0, 100.0).needs_admin_review);
    }

    #[test]
    fn test_reason_texts() {
        assert_eq!(
            decide(90.0, 100.0).reason_text,
            "Submitted price is at or below the market average"
        );
        assert_eq!(
            decide(102.0, 100.0).reason_text,
            "Submitted price is within 3% of the market average"
        );
        assert_eq!(
            decide(104.0, 100.0).reason_text,
            "Submitted price is 4.00% above the market average"
        );
        assert!(decide(106.0, 100.0).reason_text.contains("5% allowed margin"));
    }

    #[test]
    fn test_percent_difference_text_direction() {
        assert_eq!(
            percent_difference_text(104.0, 100.0),
            "4.00% higher than market average"
        );
        assert_eq!(
            percent_difference_text(97.5, 100.0),
            "2.50% lower than market average"
        );
        assert_eq!(
            percent_difference_text(100.0, 100.0),
            "0.00% higher than market average"
        );
        assert_eq!(percent_difference_text(30.0, 0.0), NO_MARKET_AVERAGE_TEXT);
    }

    #[test]
    fn test_custom_policy() {
        let policy = DecisionPolicy {
            tolerance: 0.10,
            max_markup: 0.20,
        };
        assert_eq!(policy.decide(110.0, 100.0).status, VerificationStatus::Approved);
        assert_eq!(policy.decide(115.0, 100.0).status, VerificationStatus::Warning);
        assert_eq!(policy.decide(121.0, 100.0).status, VerificationStatus::Rejected);
    }
}
