//! Guards one logical search slot against overlapping pipeline runs.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Semaphore;

use super::orchestrator::Advisor;
use super::types::AdvisoryResult;
use super::AdvisorError;

#[derive(Debug, Error)]
pub enum SlotError {
    /// A run is already in flight for this slot. The new submission is
    /// rejected outright, not queued behind the old one.
    #[error("a search is already in flight")]
    InFlight,
    #[error(transparent)]
    Advisor(#[from] AdvisorError),
}

/// Caller-facing handle over one logical search slot, shared by cloning.
///
/// The pipeline has a single suspension point, the remote call, during
/// which the caller's UI stays live. This handle gives that caller an
/// explicit reject-on-overlap contract instead of a silent race; clones
/// share the same slot.
#[derive(Clone)]
pub struct SearchSlot {
    advisor: Arc<Advisor>,
    permit: Arc<Semaphore>,
}

impl SearchSlot {
    pub fn new(advisor: Arc<Advisor>) -> Self {
        Self {
            advisor,
            permit: Arc::new(Semaphore::new(1)),
        }
    }

    pub fn advisor(&self) -> &Advisor {
        &self.advisor
    }

    /// Run one query through the advisor while holding the slot.
    pub async fn submit(&self, query: &str) -> Result<AdvisoryResult, SlotError> {
        let _guard = self.permit.try_acquire().map_err(|_| SlotError::InFlight)?;
        Ok(self.advisor.get_recommendations(query).await?)
    }
}
