//! High-level coordinator: query → prompt → remote call → parse → enrich,
//! with the fallback ranker standing in whenever the remote path fails.

use std::sync::Arc;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::types::AdvisoryResult;
use super::{enrich, fallback, AdvisorError, PipelineError};
use crate::catalog::CatalogStore;
use crate::llm::{parse_advisory, CompletionBackend};
use crate::prompt;

/// Callers only ever see up to this many recommendations, whatever the
/// backend claims to have found.
const MAX_RECOMMENDATIONS: usize = 3;

/// Public entry point of the advisory pipeline.
pub struct Advisor {
    catalog: Arc<CatalogStore>,
    backend: Arc<dyn CompletionBackend>,
}

impl Advisor {
    pub fn new(catalog: Arc<CatalogStore>, backend: Arc<dyn CompletionBackend>) -> Self {
        Self { catalog, backend }
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// Run one query end to end.
    ///
    /// Remote-path failures never surface here; they divert to the local
    /// fallback ranker and the caller still gets a ranked result. The one
    /// visible error is a blank query, rejected before any work starts.
    #[instrument(skip(self), fields(request_id = %Uuid::new_v4()))]
    pub async fn get_recommendations(
        &self,
        query: &str,
    ) -> Result<AdvisoryResult, AdvisorError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AdvisorError::EmptyQuery);
        }

        match self.primary(query).await {
            Ok(result) => Ok(result),
            Err(e) => {
                warn!(error = %e, "remote path failed, engaging fallback ranker");
                Ok(fallback::rank(query, &self.catalog))
            }
        }
    }

    /// Primary remote path, reported as a tagged result so the fallback
    /// dispatch above stays ordinary control flow.
    async fn primary(&self, query: &str) -> Result<AdvisoryResult, PipelineError> {
        let prompt = prompt::render(query, &self.catalog);
        let reply = self.backend.complete(&prompt).await?;
        let draft = parse_advisory(&reply)?;

        let mut recommendations = enrich::resolve(draft.stubs, &self.catalog);
        recommendations.truncate(MAX_RECOMMENDATIONS);

        info!(count = recommendations.len(), "primary advisory complete");
        Ok(AdvisoryResult {
            analysis: draft.analysis,
            recommendations,
        })
    }
}
