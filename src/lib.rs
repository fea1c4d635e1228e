//! # Hermes
//!
//! Recommendation core for an AI shopping advisor: turns a free-text
//! shopping query into up to three ranked picks from a fixed product
//! catalog.
//!
//! ## Architecture
//!
//! ```text
//! query → prompt::render → CompletionBackend → parse_advisory → enrich
//!                                │
//!                                │ transport / shape / parse failure
//!                                ▼
//!                        fallback::rank (local, deterministic)
//! ```
//!
//! The UI layer calls [`Advisor::get_recommendations`] and renders
//! whatever comes back. Remote failures degrade to the keyword ranker
//! instead of surfacing; the caller only ever sees an error for a blank
//! query.
//!
//! ```no_run
//! use hermes::{Advisor, ApiCredential, CatalogStore, ClientConfig, GeminiClient};
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let credential = ApiCredential::from_env().ok_or("GEMINI_API_KEY is unset")?;
//! let client = GeminiClient::new(credential, ClientConfig::default())?;
//! let advisor = Advisor::new(Arc::new(CatalogStore::builtin()), Arc::new(client));
//!
//! let advice = advisor.get_recommendations("a quiet laptop for travel").await?;
//! println!("{}", advice.analysis);
//! # Ok(())
//! # }
//! ```

pub mod advisor;
pub mod catalog;
pub mod llm;
pub mod prompt;

pub use advisor::{Advisor, AdvisorError, AdvisoryResult, Recommendation, SearchSlot, SlotError};
pub use catalog::{CatalogStore, Category, Product};
pub use llm::{ApiCredential, ClientConfig, CompletionBackend, GeminiClient, GenerationConfig};
