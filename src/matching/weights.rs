use std::collections::HashMap;

use crate::constants::DEFAULT_SOURCE_WEIGHT;

/// Fixed per-source reliability coefficients used in confidence scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceWeights {
    weights: HashMap<String, f64>,
    default_weight: f64,
}

impl Default for SourceWeights {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_WEIGHT)
    }
}

impl SourceWeights {
    /// Empty table; every source gets `default_weight`.
    pub fn new(default_weight: f64) -> Self {
        Self {
            weights: HashMap::new(),
            default_weight,
        }
    }

    pub fn with(mut self, source_id: &str, weight: f64) -> Self {
        self.weights.insert(source_id.to_string(), weight);
        self
    }

    pub fn weight_for(&self, source_id: &str) -> f64 {
        self.weights
            .get(source_id)
            .copied()
            .unwrap_or(self.default_weight)
    }

    pub fn default_weight(&self) -> f64 {
        self.default_weight
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<'a> FromIterator<(&'a str, f64)> for SourceWeights {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::default(), |table, (id, w)| table.with(id, w))
    }
}
