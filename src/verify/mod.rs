//! The `verify` entry point: gather, match, price, decide.
//!
//! "No data", "no match" and "all outliers" are ordinary outcomes and come back as a
//! `warning` verdict flagged for admin review. A panic anywhere in the pipeline is caught
//! here and degrades to the no-data verdict. Only a malformed request is an error.

pub mod error;

#[cfg(test)]
mod tests;

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use tracing::{debug, info, instrument, warn};

use crate::aggregate::Aggregator;
use crate::decision::{DecisionPolicy, NO_MARKET_AVERAGE_TEXT};
use crate::matching::MatchingCascade;
use crate::model::{
    MatchStage, MatchedReference, VerificationRequest, VerificationResult, VerificationStatus,
};
use crate::pricing::{MarketConsensus, PricingError, build_consensus};

pub use error::{VerifyError, VerifyResult};

/// Conditions under which no consensus-backed verdict can be given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// No source returned a candidate (or the pipeline failed internally).
    NoMarketData,
    /// Candidates existed but none survived the matching cascade.
    NoMatch,
    /// Every matched price was discarded by the outlier filter or had no usable amount.
    AllOutliers,
}

impl Fallback {
    pub fn reason(&self) -> &'static str {
        match self {
            Fallback::NoMarketData => "no market data available",
            Fallback::NoMatch => "could not match product in market",
            Fallback::AllOutliers => "all prices were outliers",
        }
    }

    /// Warning verdict without a consensus price, always routed to review.
    pub fn into_result(
        self,
        request: &VerificationRequest,
        stage_used: MatchStage,
        references: Vec<MatchedReference>,
    ) -> VerificationResult {
        VerificationResult {
            status: VerificationStatus::Warning,
            consensus_price: 0.0,
            submitted_price: request.submitted_price,
            max_allowed_price: 0.0,
            references,
            confidence_score: 0.0,
            reason_text: self.reason().to_string(),
            percent_difference_text: NO_MARKET_AVERAGE_TEXT.to_string(),
            stage_used,
            needs_admin_review: true,
        }
    }
}

/// Verifies submitted MRPs against the registered sources.
///
/// Stateless between calls apart from whatever cache the providers share, so one instance
/// can serve any number of concurrent verifications.
#[derive(Debug, Clone, Default)]
pub struct PriceVerifier {
    aggregator: Aggregator,
    cascade: MatchingCascade,
    policy: DecisionPolicy,
}

impl PriceVerifier {
    pub fn new(aggregator: Aggregator) -> Self {
        Self {
            aggregator,
            cascade: MatchingCascade::default(),
            policy: DecisionPolicy::default(),
        }
    }

    pub fn with_cascade(mut self, cascade: MatchingCascade) -> Self {
        self.cascade = cascade;
        self
    }

    pub fn with_policy(mut self, policy: DecisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    pub fn policy(&self) -> &DecisionPolicy {
        &self.policy
    }

    /// Runs the full pipeline for one request.
    ///
    /// # Errors
    ///
    /// [`VerifyError::InvalidRequest`] when the product name is blank or the price is not
    /// a positive amount. Every other condition produces a [`VerificationResult`].
    #[instrument(
        skip(self, request),
        fields(product = %request.product_name, submitted_price = request.submitted_price)
    )]
    pub async fn verify(&self, request: &VerificationRequest) -> VerifyResult<VerificationResult> {
        request.validate()?;

        let result = match AssertUnwindSafe(self.run_pipeline(request))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(payload) => {
                warn!(
                    panic = panic_message(payload.as_ref()),
                    "Verification pipeline panicked, degrading to no-data verdict"
                );
                Fallback::NoMarketData.into_result(
                    request,
                    MatchStage::VerificationFailed,
                    Vec::new(),
                )
            }
        };

        info!(
            status = %result.status,
            consensus_price = result.consensus_price,
            max_allowed_price = result.max_allowed_price,
            stage = %result.stage_used,
            references = result.references.len(),
            needs_admin_review = result.needs_admin_review,
            "Verification complete"
        );
        Ok(result)
    }

    async fn run_pipeline(&self, request: &VerificationRequest) -> VerificationResult {
        let candidates = self
            .aggregator
            .gather_candidates(&request.product_name)
            .await;
        if candidates.is_empty() {
            return Fallback::NoMarketData.into_result(
                request,
                MatchStage::VerificationFailed,
                Vec::new(),
            );
        }

        let Some(outcome) = self.cascade.run(request, &candidates) else {
            return Fallback::NoMatch.into_result(
                request,
                MatchStage::VerificationFailed,
                Vec::new(),
            );
        };

        let stage = outcome.stage;
        match build_consensus(outcome.references.clone()) {
            Ok(consensus) => self.conclude(request, stage, consensus),
            Err(
                err @ (PricingError::AllOutliers { .. }
                | PricingError::UnpricedReferences { .. }),
            ) => {
                debug!(error = %err, stage = %stage, "No matched price fit the consensus");
                Fallback::AllOutliers.into_result(request, stage, outcome.references)
            }
            Err(err) => {
                warn!(error = %err, stage = %stage, "No consensus could be formed");
                Fallback::NoMarketData.into_result(
                    request,
                    MatchStage::VerificationFailed,
                    Vec::new(),
                )
            }
        }
    }

    fn conclude(
        &self,
        request: &VerificationRequest,
        stage_used: MatchStage,
        consensus: MarketConsensus,
    ) -> VerificationResult {
        let verdict = self
            .policy
            .decide(request.submitted_price, consensus.consensus_price);

        VerificationResult {
            status: verdict.status,
            consensus_price: consensus.consensus_price,
            submitted_price: request.submitted_price,
            max_allowed_price: verdict.max_allowed_price,
            references: consensus.references,
            confidence_score: consensus.confidence_score,
            reason_text: verdict.reason_text,
            percent_difference_text: verdict.percent_difference_text,
            stage_used,
            needs_admin_review: verdict.needs_admin_review,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
