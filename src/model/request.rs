use serde::{Deserialize, Serialize};

use super::error::RequestError;
use crate::text::normalize_name;

/// A seller-entered listing whose MRP is to be verified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRequest {
    pub product_name: String,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub active_formula: Option<String>,
    pub submitted_price: f64,
    #[serde(default)]
    pub pack_size_descriptor: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl VerificationRequest {
    /// Starts a builder with the two required fields.
    pub fn builder(product_name: impl Into<String>, submitted_price: f64) -> RequestBuilder {
        RequestBuilder {
            request: Self {
                product_name: product_name.into(),
                manufacturer: None,
                active_formula: None,
                submitted_price,
                pack_size_descriptor: None,
                category: None,
            },
        }
    }

    /// Checks the invariants `verify` relies on.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.product_name.trim().is_empty() {
            return Err(RequestError::BlankProductName);
        }
        if normalize_name(&self.product_name).is_empty() {
            return Err(RequestError::UnmatchableProductName {
                name: self.product_name.clone(),
            });
        }
        if !self.submitted_price.is_finite() || self.submitted_price <= 0.0 {
            return Err(RequestError::InvalidPrice {
                price: self.submitted_price,
            });
        }
        Ok(())
    }

    /// Active formula, if present and not blank.
    pub fn formula(&self) -> Option<&str> {
        non_blank(self.active_formula.as_deref())
    }

    /// Manufacturer, if present and not blank.
    pub fn manufacturer(&self) -> Option<&str> {
        non_blank(self.manufacturer.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Builder for [`VerificationRequest`]; [`build`](RequestBuilder::build) validates.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    request: VerificationRequest,
}

impl RequestBuilder {
    pub fn manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.request.manufacturer = Some(manufacturer.into());
        self
    }

    pub fn active_formula(mut self, formula: impl Into<String>) -> Self {
        self.request.active_formula = Some(formula.into());
        self
    }

    pub fn pack_size(mut self, descriptor: impl Into<String>) -> Self {
        self.request.pack_size_descriptor = Some(descriptor.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.request.category = Some(category.into());
        self
    }

    pub fn build(self) -> Result<VerificationRequest, RequestError> {
        self.request.validate()?;
        Ok(self.request)
    }
}
