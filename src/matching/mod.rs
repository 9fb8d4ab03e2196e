//! Staged matching of gathered candidates against the submitted product.
//!
//! Stages run in strict order and the first one producing any reference wins:
//!
//! 1. exact normalized-name match (score `1.0`)
//! 2. composite similarity `≥ 0.75`, top 3 (score = similarity)
//! 3. formula similarity `≥ 0.8`, only when the request names a formula (score `0.8`)
//! 4. industry average: top 3 by name similarity (score = similarity × `0.5`)

pub mod weights;


use std::cmp::Ordering;

use tracing::debug;

use crate::constants::{
    FALLBACK_SCORE_PENALTY, FORMULA_MATCH_SCORE, FORMULA_SIMILARITY_THRESHOLD,
    MAX_RANKED_REFERENCES, STRONG_SIMILARITY_THRESHOLD,
};
use crate::model::{CandidateProduct, MatchStage, MatchedReference, VerificationRequest};
use crate::pricing::normalize_price;
use crate::similarity::{ProductFields, composite_similarity, edit_similarity, field_similarity};
use crate::text::{extract_pack_quantity, normalize_name, pack_quantity_or_unit};

pub use weights::SourceWeights;

/// References selected by the winning stage.
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeOutcome {
    pub stage: MatchStage,
    pub references: Vec<MatchedReference>,
}

type Scored<'a> = (&'a CandidateProduct, f64);
type StageFn = for<'a> fn(&VerificationRequest, &[&'a CandidateProduct]) -> Vec<Scored<'a>>;

/// Runs the matching stages and prices the winners at the submitted pack size.
#[derive(Debug, Clone, Default)]
pub struct MatchingCascade {
    weights: SourceWeights,
}

impl MatchingCascade {
    pub fn new(weights: SourceWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &SourceWeights {
        &self.weights
    }

    /// Selects references for `request`; `None` when no stage matched anything.
    pub fn run(
        &self,
        request: &VerificationRequest,
        candidates: &[CandidateProduct],
    ) -> Option<CascadeOutcome> {
        let usable: Vec<&CandidateProduct> =
            candidates.iter().filter(|c| c.is_well_formed()).collect();
        if usable.is_empty() {
            return None;
        }

        let stages: [(MatchStage, StageFn); 4] = [
            (MatchStage::ExactMatch, exact_matches),
            (MatchStage::StrongSimilarity, strong_matches),
            (MatchStage::FormulaLookup, formula_matches),
            (MatchStage::IndustryAverage, industry_average),
        ];

        for (stage, select) in stages {
            let selected = select(request, &usable);
            if selected.is_empty() {
                debug!(stage = %stage, "Stage produced no references");
                continue;
            }

            debug!(stage = %stage, references = selected.len(), "Stage matched");
            let target_quantity = pack_quantity_or_unit(request.pack_size_descriptor.as_deref());
            let references = selected
                .into_iter()
                .map(|(candidate, score)| self.to_reference(candidate, score, target_quantity))
                .collect();
            return Some(CascadeOutcome { stage, references });
        }

        None
    }

    fn to_reference(
        &self,
        candidate: &CandidateProduct,
        match_score: f64,
        target_quantity: u32,
    ) -> MatchedReference {
        let source_quantity = extract_pack_quantity(&candidate.raw_pack_size_descriptor);
        MatchedReference {
            source_id: candidate.source_id.clone(),
            matched_product_name: candidate.raw_product_name.clone(),
            listed_price: candidate.listed_price,
            pack_size_descriptor: candidate.raw_pack_size_descriptor.clone(),
            normalized_price: normalize_price(
                candidate.listed_price,
                source_quantity,
                target_quantity,
            ),
            source_weight: self.weights.weight_for(&candidate.source_id),
            match_score,
        }
    }
}

fn request_fields(request: &VerificationRequest) -> ProductFields<'_> {
    ProductFields {
        name: Some(&request.product_name),
        formula: request.formula(),
        manufacturer: request.manufacturer(),
    }
}

fn candidate_fields(candidate: &CandidateProduct) -> ProductFields<'_> {
    ProductFields {
        name: Some(&candidate.raw_product_name),
        formula: candidate.active_formula.as_deref(),
        manufacturer: candidate.manufacturer.as_deref(),
    }
}

/// Highest score first; ties keep gathering order.
fn rank_top<'a>(mut scored: Vec<Scored<'a>>) -> Vec<Scored<'a>> {
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.truncate(MAX_RANKED_REFERENCES);
    scored
}

fn exact_matches<'a>(
    request: &VerificationRequest,
    candidates: &[&'a CandidateProduct],
) -> Vec<Scored<'a>> {
    let target = normalize_name(&request.product_name);
    if target.is_empty() {
        return Vec::new();
    }
    candidates
        .iter()
        .filter(|c| normalize_name(&c.raw_product_name) == target)
        .map(|c| (*c, 1.0))
        .collect()
}

fn strong_matches<'a>(
    request: &VerificationRequest,
    candidates: &[&'a CandidateProduct],
) -> Vec<Scored<'a>> {
    let local = request_fields(request);
    let scored = candidates
        .iter()
        .map(|c| (*c, composite_similarity(local, candidate_fields(c))))
        .filter(|(_, score)| *score >= STRONG_SIMILARITY_THRESHOLD)
        .collect();
    rank_top(scored)
}

fn formula_matches<'a>(
    request: &VerificationRequest,
    candidates: &[&'a CandidateProduct],
) -> Vec<Scored<'a>> {
    let Some(formula) = request.formula() else {
        return Vec::new();
    };
    candidates
        .iter()
        .filter(|c| {
            field_similarity(Some(formula), c.active_formula.as_deref())
                >= FORMULA_SIMILARITY_THRESHOLD
        })
        .map(|c| (*c, FORMULA_MATCH_SCORE))
        .collect()
}

fn industry_average<'a>(
    request: &VerificationRequest,
    candidates: &[&'a CandidateProduct],
) -> Vec<Scored<'a>> {
    let target = normalize_name(&request.product_name);
    let ranked = rank_top(
        candidates
            .iter()
            .map(|c| (*c, edit_similarity(&target, &normalize_name(&c.raw_product_name))))
            .collect(),
    );
    ranked
        .into_iter()
        .map(|(c, similarity)| (c, similarity * FALLBACK_SCORE_PENALTY))
        .collect()
}
