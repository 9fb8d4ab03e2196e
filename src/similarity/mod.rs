//! Edit-distance similarity and the weighted composite used by the matching cascade.

use strsim::normalized_levenshtein;

use crate::constants::{FORMULA_WEIGHT, MANUFACTURER_WEIGHT, NAME_WEIGHT};
use crate::text::normalize_name;

/// `1 − levenshtein(a, b) / max(len(a), len(b))`, counted in chars.
///
/// Two empty strings are identical (`1.0`).
#[inline]
pub fn edit_similarity(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b)
}

/// Similarity of two optional fields after normalization.
///
/// A missing or blank side scores `0.0`: an unknown formula is non-matching, not neutral.
pub fn field_similarity(local: Option<&str>, candidate: Option<&str>) -> f64 {
    let local = local.map(normalize_name).filter(|s| !s.is_empty());
    let candidate = candidate.map(normalize_name).filter(|s| !s.is_empty());

    match (local, candidate) {
        (Some(a), Some(b)) => edit_similarity(&a, &b),
        _ => 0.0,
    }
}

/// One side of a composite comparison.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductFields<'a> {
    pub name: Option<&'a str>,
    pub formula: Option<&'a str>,
    pub manufacturer: Option<&'a str>,
}

/// `0.5·name + 0.3·formula + 0.2·manufacturer`.
pub fn composite_similarity(local: ProductFields<'_>, candidate: ProductFields<'_>) -> f64 {
    NAME_WEIGHT * field_similarity(local.name, candidate.name)
        + FORMULA_WEIGHT * field_similarity(local.formula, candidate.formula)
        + MANUFACTURER_WEIGHT * field_similarity(local.manufacturer, candidate.manufacturer)
}
