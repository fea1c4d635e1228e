//! Public façade for the advisory pipeline.

pub mod enrich;
pub mod fallback;
pub mod orchestrator;
pub mod slot;
pub mod types;

pub use orchestrator::Advisor;
pub use slot::{SearchSlot, SlotError};
pub use types::{AdvisoryResult, Recommendation, RecommendationStub};

use thiserror::Error;

use crate::llm::{InferenceError, ParseError};

/// Remote-path failure from either leg of inference → parse. The
/// orchestrator consumes this to dispatch the fallback ranker; it never
/// reaches the caller.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("inference failed: {0}")]
    Inference(#[from] InferenceError),
    #[error("reply rejected: {0}")]
    Parse(#[from] ParseError),
}

/// The one failure callers of [`Advisor::get_recommendations`] can see.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdvisorError {
    /// Blank or whitespace-only query, rejected before any pipeline work.
    #[error("query must not be empty")]
    EmptyQuery,
}
