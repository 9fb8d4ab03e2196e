use serde::{Deserialize, Serialize};

/// Three-way verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Approved,
    Warning,
    Rejected,
}

impl VerificationStatus {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Approved => "approved",
            VerificationStatus::Warning => "warning",
            VerificationStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Matching-cascade stage that produced the references, or the failure marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStage {
    #[serde(rename = "Exact Match")]
    ExactMatch,
    #[serde(rename = "Strong Similarity")]
    StrongSimilarity,
    #[serde(rename = "Formula Lookup")]
    FormulaLookup,
    #[serde(rename = "Industry Average")]
    IndustryAverage,
    #[serde(rename = "Verification Failed")]
    VerificationFailed,
}

impl MatchStage {
    #[inline]
    pub fn label(&self) -> &'static str {
        match self {
            MatchStage::ExactMatch => "Exact Match",
            MatchStage::StrongSimilarity => "Strong Similarity",
            MatchStage::FormulaLookup => "Formula Lookup",
            MatchStage::IndustryAverage => "Industry Average",
            MatchStage::VerificationFailed => "Verification Failed",
        }
    }

    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, MatchStage::VerificationFailed)
    }
}

impl std::fmt::Display for MatchStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A candidate accepted by the cascade, priced at the submitted pack size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedReference {
    pub source_id: String,
    pub matched_product_name: String,
    pub listed_price: f64,
    pub pack_size_descriptor: String,
    /// `listed_price / source_pack × target_pack`, rounded to cents.
    pub normalized_price: f64,
    pub source_weight: f64,
    pub match_score: f64,
}

/// Verdict plus the evidence behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub status: VerificationStatus,
    pub consensus_price: f64,
    pub submitted_price: f64,
    pub max_allowed_price: f64,
    pub references: Vec<MatchedReference>,
    pub confidence_score: f64,
    pub reason_text: String,
    pub percent_difference_text: String,
    pub stage_used: MatchStage,
    pub needs_admin_review: bool,
}

impl VerificationResult {
    pub fn is_approved(&self) -> bool {
        self.status == VerificationStatus::Approved
    }

    /// Signed percentage of submitted over consensus; `None` without a consensus.
    pub fn percent_difference(&self) -> Option<f64> {
        (self.consensus_price > 0.0).then(|| {
            (self.submitted_price - self.consensus_price) / self.consensus_price * 100.0
        })
    }
}
