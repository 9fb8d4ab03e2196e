use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{ListingParser, clean_text, parse_price_text};
use crate::model::CandidateProduct;

/// Envelope keys searched (in order) for the listing array.
const LISTING_KEYS: [&str; 4] = ["products", "results", "items", "data"];

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Loose {
    Number(f64),
    Text(String),
}

impl Loose {
    fn as_price(&self) -> Option<f64> {
        match self {
            Loose::Number(n) => Some(*n).filter(|p| p.is_finite() && *p > 0.0),
            Loose::Text(s) => parse_price_text(s),
        }
    }

    fn into_text(self) -> Option<String> {
        match self {
            Loose::Number(n) => Some(n.to_string()),
            Loose::Text(s) => clean_text(s),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawListing {
    #[serde(default, alias = "title", alias = "productName")]
    name: Option<String>,
    #[serde(default, alias = "mrp", alias = "salePrice")]
    price: Option<Loose>,
    #[serde(default, alias = "packSize", alias = "pack", alias = "packSizeLabel")]
    pack_size: Option<Loose>,
    #[serde(default, alias = "composition", alias = "salt", alias = "activeFormula")]
    formula: Option<String>,
    #[serde(default, alias = "brand", alias = "marketer")]
    manufacturer: Option<String>,
    #[serde(default, alias = "link", alias = "href")]
    url: Option<String>,
}

impl RawListing {
    fn into_candidate(self, source_id: &str) -> Option<CandidateProduct> {
        let name = clean_text(self.name?)?;
        let price = self.price?.as_price()?;

        let mut candidate = CandidateProduct::new(source_id, name, price);
        if let Some(pack) = self.pack_size.and_then(Loose::into_text) {
            candidate = candidate.with_pack_size(pack);
        }
        if let Some(formula) = self.formula.and_then(clean_text) {
            candidate = candidate.with_formula(formula);
        }
        if let Some(manufacturer) = self.manufacturer.and_then(clean_text) {
            candidate = candidate.with_manufacturer(manufacturer);
        }
        if let Some(url) = self.url.and_then(clean_text) {
            candidate = candidate.with_origin_url(url);
        }
        candidate.is_well_formed().then_some(candidate)
    }
}

/// Parses JSON search APIs.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonListingParser;

impl JsonListingParser {
    pub fn new() -> Self {
        Self
    }

    fn listings(root: Value) -> Vec<Value> {
        match root {
            Value::Array(items) => items,
            Value::Object(mut map) => {
                for key in LISTING_KEYS {
                    if let Some(Value::Array(items)) = map.remove(key) {
                        return items;
                    }
                }
                vec![Value::Object(map)]
            }
            _ => Vec::new(),
        }
    }
}

impl ListingParser for JsonListingParser {
    fn parse(&self, source_id: &str, body: &str) -> Option<CandidateProduct> {
        let root: Value = match serde_json::from_str(body) {
            Ok(root) => root,
            Err(e) => {
                debug!(source = source_id, error = %e, "Response is not valid JSON");
                return None;
            }
        };

        Self::listings(root)
            .into_iter()
            .filter_map(|item| serde_json::from_value::<RawListing>(item).ok())
            .find_map(|raw| raw.into_candidate(source_id))
    }
}
