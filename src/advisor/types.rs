//! Shared structs for the advisory pipeline.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// One entry of the backend's `recommendations` array, before the catalog
/// join. `productId` is the only field whose absence drops the entry; the
/// rest default leniently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationStub {
    pub product_id: u32,
    #[serde(default)]
    pub match_score: u8,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

/// A stub joined with its resolved catalog product, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub product: Product,
    pub match_score: u8,
    pub reason: String,
    pub highlights: Vec<String>,
}

/// Final pipeline output: analysis text plus ranked picks, best first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryResult {
    pub analysis: String,
    pub recommendations: Vec<Recommendation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_decodes_from_camel_case() {
        let stub: RecommendationStub = serde_json::from_str(
            r#"{"productId": 5, "matchScore": 77, "reason": "solid", "highlights": ["a", "b"]}"#,
        )
        .unwrap();

        assert_eq!(stub.product_id, 5);
        assert_eq!(stub.match_score, 77);
        assert_eq!(stub.reason, "solid");
        assert_eq!(stub.highlights, vec!["a", "b"]);
    }

    #[test]
    fn stub_defaults_everything_but_the_id() {
        let stub: RecommendationStub = serde_json::from_str(r#"{"productId": 9}"#).unwrap();

        assert_eq!(stub.product_id, 9);
        assert_eq!(stub.match_score, 0);
        assert!(stub.reason.is_empty());
        assert!(stub.highlights.is_empty());
    }

    #[test]
    fn stub_without_id_fails_to_decode() {
        let result = serde_json::from_str::<RecommendationStub>(r#"{"matchScore": 50}"#);
        assert!(result.is_err());
    }
}
