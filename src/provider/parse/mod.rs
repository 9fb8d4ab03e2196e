//! Response parsers: turn a search response body into at most one candidate.
//!
//! Parsers never fail loudly. Anything malformed, empty or priceless is `None`.

pub mod json;
pub mod markup;

use std::sync::LazyLock;

use regex::Regex;

use crate::model::CandidateProduct;

pub use json::JsonListingParser;
pub use markup::{MarkupListingParser, MarkupSelectors};

/// Extracts the first well-formed listing from a response body.
pub trait ListingParser: Send + Sync {
    fn parse(&self, source_id: &str, body: &str) -> Option<CandidateProduct>;
}

static PRICE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d[\d,]*(?:\.\d+)?").expect("price pattern is valid")
});

/// Parses display prices such as `"₹ 1,234.50"` or `"MRP Rs.30"`.
pub fn parse_price_text(text: &str) -> Option<f64> {
    let raw = PRICE_NUMBER.find(text)?.as_str().replace(',', "");
    raw.parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p > 0.0)
}

/// Trims and drops blank strings.
pub(crate) fn clean_text(text: impl AsRef<str>) -> Option<String> {
    let collapsed = text
        .as_ref()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    (!collapsed.is_empty()).then_some(collapsed)
}
