//! Text canonicalization for product names and pack-size descriptors.
//!
//! Both functions are total: any input (including empty) produces a usable value.

use regex::Regex;
use std::sync::LazyLock;


/// Unit tokens recognized after a quantity in a pack descriptor.
pub const PACK_UNITS: [&str; 6] = ["tablet", "capsule", "ml", "mg", "strip", "piece"];

// The number may not continue a digit run or a decimal (`2.5 ml`); a letter
// before it is fine (`1x10 tablets`).
static PACK_QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^\d.])(\d+)\s*(tablet|capsule|ml|mg|strip|piece)s?\b")
        .expect("pack quantity pattern is valid")
});

/// Lowercases, replaces punctuation with spaces and collapses whitespace.
pub fn normalize_name(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .flat_map(char::to_lowercase)
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts the pack quantity from a descriptor such as `"strip of 10 tablets"`.
///
/// Returns the first `<N> <unit>` quantity found, or `1` when the descriptor carries no
/// recognized quantity. Zero and overflowing quantities are treated as absent.
pub fn extract_pack_quantity(descriptor: &str) -> u32 {
    PACK_QUANTITY
        .captures(descriptor)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(1)
}

/// Same as [`extract_pack_quantity`] but for an optional descriptor.
#[inline]
pub fn pack_quantity_or_unit(descriptor: Option<&str>) -> u32 {
    descriptor.map(extract_pack_quantity).unwrap_or(1)
}
