//! Local, network-free fallback ranking used when remote inference is
//! unavailable or returned something unusable.

use tracing::debug;

use super::types::{AdvisoryResult, Recommendation};
use crate::catalog::{CatalogStore, Category, Product};

/// Disclosure shown in place of the backend's analysis text.
const FALLBACK_ANALYSIS: &str = "AI service is temporarily unavailable. \
Showing highly-rated products based on keyword matching.";

/// Top fallback score; each following rank drops by [`SCORE_STEP`].
const TOP_SCORE: u8 = 85;
const SCORE_STEP: u8 = 5;
const MAX_PICKS: usize = 3;

/// Rank catalog products for a query without any remote call.
///
/// Deterministic: lower-case the query, apply the first matching
/// keyword-to-category rule (or keep the full catalog), sort by rating
/// descending with catalog order breaking ties, take the top three.
/// Cannot fail; an empty catalog yields zero recommendations.
pub fn rank(query: &str, catalog: &CatalogStore) -> AdvisoryResult {
    let category = classify_query(query);
    debug!(?category, "fallback ranking engaged");

    let mut picks: Vec<&Product> = match category {
        Some(category) => catalog.by_category(category).collect(),
        None => catalog.iter().collect(),
    };
    picks.sort_by(|a, b| b.rating.total_cmp(&a.rating));

    let recommendations = picks
        .into_iter()
        .take(MAX_PICKS)
        .enumerate()
        .map(|(rank_index, product)| Recommendation {
            match_score: TOP_SCORE - SCORE_STEP * rank_index as u8,
            reason: format!(
                "This is a highly-rated {} with excellent features that may match your needs.",
                product.category.as_str().to_lowercase()
            ),
            highlights: product.features.iter().take(3).cloned().collect(),
            product: product.clone(),
        })
        .collect();

    AdvisoryResult {
        analysis: FALLBACK_ANALYSIS.to_string(),
        recommendations,
    }
}

/// First matching rule wins; later keywords never override earlier ones.
fn classify_query(query: &str) -> Option<Category> {
    let query = query.to_lowercase();

    if query.contains("laptop") || query.contains("computer") {
        Some(Category::Laptop)
    } else if query.contains("phone") || query.contains("smartphone") {
        Some(Category::Smartphone)
    } else if query.contains("tablet") || query.contains("ipad") {
        Some(Category::Tablet)
    } else if query.contains("headphone") || query.contains("audio") {
        Some(Category::Headphones)
    } else {
        None
    }
}
