//! Remote inference layer: one HTTP round trip to a Gemini-style
//! `generateContent` endpoint, plus the parser that turns the raw reply
//! into structured advisory data.

pub mod client;
pub mod parser;

pub use client::{GeminiClient, InferenceError};
pub use parser::{parse_advisory, AdvisoryDraft, ParseError};

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Default completion endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-latest:generateContent";

/// Environment variable holding the backend API key.
const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Sampling parameters sent with every request. Fixed per deployment, not
/// negotiated at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 2048,
        }
    }
}

/// Connection settings for [`GeminiClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: Url,
    /// Per-request timeout. `None` keeps reqwest's default behavior; callers
    /// wanting a bound set one here.
    pub timeout: Option<Duration>,
    pub generation: GenerationConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            timeout: None,
            generation: GenerationConfig::default(),
        }
    }
}

/// API key for the inference backend, injected by the caller rather than
/// read from ambient globals. `Debug` output never reveals the key.
#[derive(Clone)]
pub struct ApiCredential(String);

impl ApiCredential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Reads `GEMINI_API_KEY` from the environment, if set and non-empty.
    pub fn from_env() -> Option<Self> {
        std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.is_empty())
            .map(Self)
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiCredential").field(&"[REDACTED]").finish()
    }
}

/// One-shot completion transport.
///
/// The orchestrator talks to this trait rather than a concrete HTTP
/// client, so tests can script replies without a network.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Submit one prompt and return the backend's raw text reply.
    ///
    /// Exactly one outbound request per call. No retries; callers wanting
    /// retry or backoff wrap this themselves.
    async fn complete(&self, prompt: &str) -> Result<String, InferenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_debug_is_redacted() {
        let credential = ApiCredential::new("sk-very-secret");
        let rendered = format!("{credential:?}");

        assert!(!rendered.contains("sk-very-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn generation_config_serializes_camel_case() {
        let json = serde_json::to_value(GenerationConfig::default()).unwrap();

        assert_eq!(json["temperature"], 0.7);
        assert_eq!(json["topK"], 40);
        assert_eq!(json["topP"], 0.95);
        assert_eq!(json["maxOutputTokens"], 2048);
    }

    #[test]
    fn default_endpoint_parses() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint.scheme(), "https");
        assert!(config.timeout.is_none());
    }
}
