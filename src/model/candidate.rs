use serde::{Deserialize, Serialize};

/// Best-guess product record returned by one source for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProduct {
    pub source_id: String,
    pub raw_product_name: String,
    pub listed_price: f64,
    #[serde(default)]
    pub raw_pack_size_descriptor: String,
    #[serde(default)]
    pub active_formula: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub origin_url: Option<String>,
}

impl CandidateProduct {
    pub fn new(source_id: impl Into<String>, name: impl Into<String>, listed_price: f64) -> Self {
        Self {
            source_id: source_id.into(),
            raw_product_name: name.into(),
            listed_price,
            raw_pack_size_descriptor: String::new(),
            active_formula: None,
            manufacturer: None,
            origin_url: None,
        }
    }

    pub fn with_pack_size(mut self, descriptor: impl Into<String>) -> Self {
        self.raw_pack_size_descriptor = descriptor.into();
        self
    }

    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.active_formula = Some(formula.into());
        self
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    pub fn with_origin_url(mut self, url: impl Into<String>) -> Self {
        self.origin_url = Some(url.into());
        self
    }

    /// Non-blank name and a finite positive price.
    pub fn is_well_formed(&self) -> bool {
        !self.raw_product_name.trim().is_empty()
            && self.listed_price.is_finite()
            && self.listed_price > 0.0
    }
}
