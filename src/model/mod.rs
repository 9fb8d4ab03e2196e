//! Request, candidate and result types shared across the pipeline.
//!
//! All types are serde-serializable (camelCase) so callers can embed a
//! [`VerificationResult`] in their own persisted records.

pub mod candidate;
pub mod error;
pub mod request;
pub mod result;

pub use candidate::CandidateProduct;
pub use error::RequestError;
pub use request::{RequestBuilder, VerificationRequest};
pub use result::{MatchStage, MatchedReference, VerificationResult, VerificationStatus};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_validates() {
        let request = VerificationRequest::builder("Paracetamol 500mg", 30.0)
            .manufacturer("GSK")
            .active_formula("Paracetamol")
            .pack_size("strip of 15 tablets")
            .category("Medicines")
            .build()
            .expect("valid request");
        assert_eq!(request.formula(), Some("Paracetamol"));
        assert_eq!(request.manufacturer(), Some("GSK"));

        assert_eq!(
            VerificationRequest::builder("  ", 30.0).build(),
            Err(RequestError::BlankProductName)
        );
        assert!(matches!(
            VerificationRequest::builder("Crocin", 0.0).build(),
            Err(RequestError::InvalidPrice { .. })
        ));
        assert!(VerificationRequest::builder("Crocin", f64::NAN).build().is_err());
    }

    #[test]
    fn test_punctuation_only_name_rejected() {
        assert!(matches!(
            VerificationRequest::builder("!!!", 30.0).build(),
            Err(RequestError::UnmatchableProductName { .. })
        ));
        assert!(VerificationRequest::builder("#1", 30.0).build().is_ok());
    }

    #[test]
    fn test_blank_optional_fields_are_absent() {
        let request = VerificationRequest::builder("Crocin", 20.0)
            .active_formula(" ")
            .build()
            .expect("valid request");
        assert_eq!(request.formula(), None);
        assert_eq!(request.manufacturer(), None);
    }

    #[test]
    fn test_request_deserializes_camel_case() {
        let request: VerificationRequest = serde_json::from_str(
            r#"{"productName":"Dolo 650","submittedPrice":31.5,"packSizeDescriptor":"15 tablets"}"#,
        )
        .expect("deserialize");
        assert_eq!(request.product_name, "Dolo 650");
        assert_eq!(request.pack_size_descriptor.as_deref(), Some("15 tablets"));
        assert!(request.active_formula.is_none());
    }

    #[test]
    fn test_result_serializes_labels() {
        let result = VerificationResult {
            status: VerificationStatus::Warning,
            consensus_price: 0.0,
            submitted_price: 30.0,
            max_allowed_price: 0.0,
            references: vec![],
            confidence_score: 0.0,
            reason_text: "no market data available".to_string(),
            percent_difference_text: "market average unavailable".to_string(),
            stage_used: MatchStage::VerificationFailed,
            needs_admin_review: true,
        };
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["status"], "warning");
        assert_eq!(json["stageUsed"], "Verification Failed");
        assert_eq!(json["needsAdminReview"], true);
        assert_eq!(result.percent_difference(), None);
    }

    #[test]
    fn test_candidate_well_formed() {
        assert!(CandidateProduct::new("alpha", "Crocin", 20.0).is_well_formed());
        assert!(!CandidateProduct::new("alpha", " ", 20.0).is_well_formed());
        assert!(!CandidateProduct::new("alpha", "Crocin", 0.0).is_well_formed());
        assert!(!CandidateProduct::new("alpha", "Crocin", f64::INFINITY).is_well_formed());
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(MatchStage::ExactMatch.to_string(), "Exact Match");
        assert!(MatchStage::VerificationFailed.is_failure());
        assert!(!MatchStage::IndustryAverage.is_failure());
        assert_eq!(VerificationStatus::Rejected.to_string(), "rejected");
    }
}
