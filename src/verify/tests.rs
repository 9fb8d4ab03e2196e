use std::sync::Arc;

use super::*;
use crate::model::{CandidateProduct, RequestError};
use crate::provider::{PanickingProvider, SourceProvider, StaticProvider};

fn request(price: f64) -> VerificationRequest {
    VerificationRequest::builder("Paracetamol 500mg", price)
        .build()
        .expect("valid request")
}

fn verifier_for(prices: &[f64]) -> PriceVerifier {
    let providers = prices
        .iter()
        .enumerate()
        .map(|(i, price)| {
            StaticProvider::returning(exact(&format!("s{i}"), *price)).into_arc()
        })
        .collect();
    PriceVerifier::new(Aggregator::new(providers))
}

fn exact(source: &str, price: f64) -> CandidateProduct {
    CandidateProduct::new(source, "Paracetamol 500mg", price)
}

#[tokio::test]
async fn test_consensus_verdict() {
    let result = verifier_for(&[100.0, 102.0, 98.0, 500.0])
        .verify(&request(104.0))
        .await
        .unwrap();

    assert_eq!(result.status, VerificationStatus::Warning);
    assert_eq!(result.consensus_price, 100.0);
    assert_eq!(result.max_allowed_price, 105.0);
    assert_eq!(result.references.len(), 3);
    assert_eq!(result.stage_used, MatchStage::ExactMatch);
    assert_eq!(result.confidence_score, 0.6);
    assert!(result.needs_admin_review);
    assert_eq!(
        result.percent_difference_text,
        "4.00% higher than market average"
    );
}

#[tokio::test]
async fn test_no_market_data() {
    let verifier = PriceVerifier::new(Aggregator::new(vec![
        StaticProvider::empty("alpha").into_arc(),
    ]));
    let result = verifier.verify(&request(30.0)).await.unwrap();

    assert_eq!(
        result,
        Fallback::NoMarketData.into_result(
            &request(30.0),
            MatchStage::VerificationFailed,
            Vec::new(),
        )
    );
    assert_eq!(result.reason_text, "no market data available");
    assert_eq!(result.consensus_price, 0.0);
    assert!(result.needs_admin_review);
}

#[tokio::test]
async fn test_all_outliers_keeps_stage_and_references() {
    let result = verifier_for(&[10.0, 100.0])
        .verify(&request(50.0))
        .await
        .unwrap();

    assert_eq!(result.status, VerificationStatus::Warning);
    assert_eq!(result.reason_text, "all prices were outliers");
    assert_eq!(result.stage_used, MatchStage::ExactMatch);
    assert_eq!(result.references.len(), 2);
    assert_eq!(result.consensus_price, 0.0);
    assert_eq!(result.percent_difference_text, NO_MARKET_AVERAGE_TEXT);
}

#[tokio::test]
async fn test_sub_cent_prices_are_not_missing_data() {
    let result = verifier_for(&[0.004, 0.003])
        .verify(&request(30.0))
        .await
        .unwrap();

    assert_eq!(result.reason_text, Fallback::AllOutliers.reason());
    assert_eq!(result.stage_used, MatchStage::ExactMatch);
    assert_eq!(result.references.len(), 2);
    assert_eq!(result.consensus_price, 0.0);
    assert!(result.needs_admin_review);
}

#[tokio::test]
async fn test_panic_degrades_to_no_data() {
    let verifier = PriceVerifier::new(Aggregator::new(vec![
        StaticProvider::returning(exact("alpha", 30.0)).into_arc(),
        Arc::new(PanickingProvider::new("broken")) as Arc<dyn SourceProvider>,
    ]));
    let result = verifier.verify(&request(30.0)).await.unwrap();

    assert_eq!(result.status, VerificationStatus::Warning);
    assert_eq!(result.reason_text, Fallback::NoMarketData.reason());
    assert_eq!(result.stage_used, MatchStage::VerificationFailed);
    assert!(result.needs_admin_review);
}

#[tokio::test]
async fn test_invalid_request_is_an_error() {
    let verifier = verifier_for(&[30.0]);
    let mut bad = request(30.0);
    bad.submitted_price = -1.0;

    let err = verifier.verify(&bad).await.unwrap_err();
    assert!(matches!(err, VerifyError::InvalidRequest(_)));

    bad.submitted_price = 30.0;
    bad.product_name = " ".to_string();
    assert!(verifier.verify(&bad).await.is_err());

    bad.product_name = "!!!".to_string();
    assert!(matches!(
        verifier.verify(&bad).await,
        Err(VerifyError::InvalidRequest(RequestError::UnmatchableProductName { .. }))
    ));
}

#[tokio::test]
async fn test_custom_policy_is_used() {
    let verifier = verifier_for(&[100.0]).with_policy(DecisionPolicy {
        tolerance: 0.10,
        max_markup: 0.20,
    });
    let result = verifier.verify(&request(108.0)).await.unwrap();
    assert!(result.is_approved());
    assert_eq!(result.max_allowed_price, 120.0);
}

#[test]
fn test_fallback_reasons() {
    assert_eq!(Fallback::NoMatch.reason(), "could not match product in market");
    let result =
        Fallback::NoMatch.into_result(&request(12.5), MatchStage::VerificationFailed, Vec::new());
    assert_eq!(result.submitted_price, 12.5);
    assert_eq!(result.max_allowed_price, 0.0);
    assert_eq!(result.confidence_score, 0.0);
    assert_eq!(result.percent_difference(), None);
}
