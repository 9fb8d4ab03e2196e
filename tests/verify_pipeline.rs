//! End-to-end verification scenarios.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::fixtures::{PRODUCT_NAME, listing, request, verifier_with_prices};
use mrp_guard::cache::{MemoryQuoteCache, QuoteCache};
use mrp_guard::provider::{
    HttpProvider, PanickingProvider, ProviderConfig, RetryPolicy, SourceProvider, StaticProvider,
};
use mrp_guard::{
    Aggregator, CandidateProduct, MatchStage, MatchingCascade, PriceVerifier, SourceWeights,
    VerificationRequest, VerificationStatus, VerifyError,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_three_sources_approve_submitted_price() {
    let result = verifier_with_prices(&[28.0, 29.0, 31.0])
        .verify(&request(30.0))
        .await
        .expect("verify");

    assert_eq!(result.status, VerificationStatus::Approved);
    assert_eq!(result.consensus_price, 29.17);
    assert_eq!(result.max_allowed_price, 30.63);
    assert_eq!(result.stage_used, MatchStage::ExactMatch);
    assert_eq!(result.references.len(), 3);
    assert_eq!(result.confidence_score, 0.6);
    assert_eq!(
        result.percent_difference_text,
        "2.85% higher than market average"
    );
    assert!(!result.needs_admin_review);
}

#[tokio::test]
async fn test_all_sources_fail() {
    let verifier = PriceVerifier::new(Aggregator::new(vec![
        StaticProvider::empty("alpha").into_arc(),
        StaticProvider::empty("beta").into_arc(),
        StaticProvider::empty("gamma").into_arc(),
    ]));

    let result = verifier.verify(&request(30.0)).await.expect("verify");

    assert_eq!(result.status, VerificationStatus::Warning);
    assert_eq!(result.consensus_price, 0.0);
    assert!(result.needs_admin_review);
    assert_eq!(result.stage_used, MatchStage::VerificationFailed);
    assert_eq!(result.reason_text, "no market data available");
    assert!(result.references.is_empty());
}

#[tokio::test]
async fn test_decision_boundaries_at_consensus_100() {
    let verifier = verifier_with_prices(&[100.0]);
    let cases = [
        (103.0, VerificationStatus::Approved),
        (103.01, VerificationStatus::Warning),
        (104.0, VerificationStatus::Warning),
        (105.0, VerificationStatus::Warning),
        (105.01, VerificationStatus::Rejected),
        (106.0, VerificationStatus::Rejected),
    ];

    for (submitted, expected) in cases {
        let result = verifier.verify(&request(submitted)).await.expect("verify");
        assert_eq!(result.consensus_price, 100.0);
        assert_eq!(result.status, expected, "submitted {submitted}");
    }
}

#[tokio::test]
async fn test_outlier_source_does_not_move_consensus() {
    let result = verifier_with_prices(&[100.0, 102.0, 98.0, 500.0])
        .verify(&request(100.0))
        .await
        .expect("verify");

    assert_eq!(result.consensus_price, 100.0);
    assert!(result.references.iter().all(|r| r.normalized_price != 500.0));
    assert!(result.is_approved());
}

#[tokio::test]
async fn test_exact_match_preferred_over_formula_match() {
    let request = VerificationRequest::builder(PRODUCT_NAME, 30.0)
        .active_formula("Paracetamol")
        .build()
        .expect("valid request");

    let verifier = PriceVerifier::new(Aggregator::new(vec![
        StaticProvider::returning(listing("alpha", 29.0)).into_arc(),
        StaticProvider::returning(
            CandidateProduct::new("beta", "Crocin Advance", 18.0).with_formula("Paracetamol"),
        )
        .into_arc(),
    ]));

    let result = verifier.verify(&request).await.expect("verify");

    assert_eq!(result.stage_used, MatchStage::ExactMatch);
    assert_eq!(result.references.len(), 1);
    assert_eq!(result.references[0].source_id, "alpha");
    assert_eq!(result.consensus_price, 29.0);
}

#[tokio::test]
async fn test_pack_sizes_are_normalized_before_consensus() {
    let request = VerificationRequest::builder(PRODUCT_NAME, 30.0)
        .pack_size("strip of 10 tablets")
        .build()
        .expect("valid request");

    let verifier = PriceVerifier::new(Aggregator::new(vec![
        StaticProvider::returning(listing("alpha", 28.0).with_pack_size("10 tablets")).into_arc(),
        StaticProvider::returning(listing("beta", 43.5).with_pack_size("15 Tablets")).into_arc(),
        StaticProvider::returning(listing("gamma", 31.0).with_pack_size("10 tablet")).into_arc(),
    ]))
    .with_cascade(MatchingCascade::new(
        SourceWeights::default().with("alpha", 0.3).with("beta", 0.3),
    ));

    let result = verifier.verify(&request).await.expect("verify");

    let mut prices: Vec<f64> = result.references.iter().map(|r| r.normalized_price).collect();
    prices.sort_by(|a, b| a.total_cmp(b));
    assert_eq!(prices, vec![28.0, 29.0, 31.0]);
    assert_eq!(result.consensus_price, 29.17);
    assert_eq!(result.confidence_score, 0.8);
    assert_eq!(result.status, VerificationStatus::Approved);
}

#[tokio::test]
async fn test_panicking_source_degrades_to_review() {
    let verifier = PriceVerifier::new(Aggregator::new(vec![
        StaticProvider::returning(listing("alpha", 29.0)).into_arc(),
        Arc::new(PanickingProvider::new("broken")) as Arc<dyn SourceProvider>,
    ]));

    let result = verifier.verify(&request(30.0)).await.expect("verify");

    assert_eq!(result.status, VerificationStatus::Warning);
    assert_eq!(result.stage_used, MatchStage::VerificationFailed);
    assert!(result.needs_admin_review);
}

#[tokio::test]
async fn test_invalid_request_is_rejected_up_front() {
    let provider = StaticProvider::returning(listing("alpha", 29.0));
    let calls = provider.calls();
    let verifier = PriceVerifier::new(Aggregator::new(vec![provider.into_arc()]));

    let mut bad = request(30.0);
    bad.submitted_price = 0.0;

    let err = verifier.verify(&bad).await.expect_err("zero price");
    assert!(matches!(err, VerifyError::InvalidRequest(_)));
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_repeat_verification_is_served_from_cache() {
    let server = MockServer::start().await;
    for (source, price) in [("alpha", 28.0), ("beta", 29.0), ("gamma", 31.0)] {
        Mock::given(method("GET"))
            .and(path(format!("/{source}/search")))
            .and(query_param("q", PRODUCT_NAME))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "products": [{ "name": PRODUCT_NAME, "price": price }]
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let cache: Arc<dyn QuoteCache> = Arc::new(MemoryQuoteCache::new());
    let retry = RetryPolicy {
        timeout: Duration::from_secs(2),
        retries: 0,
        backoff: Duration::from_millis(10),
    };
    let providers = ["alpha", "beta", "gamma"]
        .into_iter()
        .map(|source| {
            let config =
                ProviderConfig::new(source, format!("{}/{source}/search", server.uri()))
                    .retry(retry.clone());
            Arc::new(HttpProvider::json(config, Arc::clone(&cache)).expect("provider"))
                as Arc<dyn SourceProvider>
        })
        .collect();
    let verifier = PriceVerifier::new(Aggregator::new(providers));

    let first = verifier.verify(&request(30.0)).await.expect("verify");
    let second = verifier.verify(&request(30.0)).await.expect("verify");

    assert_eq!(first, second);
    assert_eq!(first.consensus_price, 29.17);
    assert!(first.is_approved());
}
