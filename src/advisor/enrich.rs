//! Enrichment: joins recommendation stubs against the catalog.

use tracing::{debug, warn};

use super::types::{Recommendation, RecommendationStub};
use crate::catalog::CatalogStore;

/// Resolve each stub's identifier against the catalog.
///
/// Output order mirrors input order, which carries the backend's relevance
/// ranking; nothing is re-sorted. Stubs naming an unknown product are
/// dropped with a warning, never an error; the remainder still resolves.
pub fn resolve(stubs: Vec<RecommendationStub>, catalog: &CatalogStore) -> Vec<Recommendation> {
    let mut recommendations = Vec::with_capacity(stubs.len());

    for stub in stubs {
        match catalog.get(stub.product_id) {
            Some(product) => recommendations.push(Recommendation {
                product: product.clone(),
                match_score: stub.match_score,
                reason: stub.reason,
                highlights: stub.highlights,
            }),
            None => warn!(
                product_id = stub.product_id,
                "dropping stub for unknown product"
            ),
        }
    }

    debug!(resolved = recommendations.len(), "enrichment complete");
    recommendations
}
