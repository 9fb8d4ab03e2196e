//! Test fixtures for integration tests.

use std::sync::Arc;

use mrp_guard::provider::{SourceProvider, StaticProvider};
use mrp_guard::{Aggregator, CandidateProduct, PriceVerifier, VerificationRequest};

pub const PRODUCT_NAME: &str = "Paracetamol 500mg";

pub const SOURCE_IDS: [&str; 3] = ["alpha", "beta", "gamma"];

pub fn request(price: f64) -> VerificationRequest {
    VerificationRequest::builder(PRODUCT_NAME, price)
        .build()
        .expect("valid request")
}

pub fn listing(source_id: &str, price: f64) -> CandidateProduct {
    CandidateProduct::new(source_id, PRODUCT_NAME, price)
}

/// One static provider per price, all listing the product under its exact name.
pub fn providers_with_prices(prices: &[f64]) -> Vec<Arc<dyn SourceProvider>> {
    prices
        .iter()
        .zip(SOURCE_IDS.iter().cycle())
        .enumerate()
        .map(|(i, (price, source))| {
            StaticProvider::returning(listing(&format!("{source}-{i}"), *price)).into_arc()
        })
        .collect()
}

pub fn verifier_with_prices(prices: &[f64]) -> PriceVerifier {
    PriceVerifier::new(Aggregator::new(providers_with_prices(prices)))
}
