//! HTTP transport to the Gemini `generateContent` API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::{ApiCredential, ClientConfig, CompletionBackend, GenerationConfig};

#[derive(Debug, Error)]
pub enum InferenceError {
    /// The round trip itself failed: network unreachable, timeout, or a
    /// non-2xx status. Carries the status code and response body when the
    /// backend got far enough to produce them.
    #[error("transport failure: {detail}")]
    Transport { status: Option<u16>, detail: String },
    /// 2xx reply whose body does not carry the expected envelope. Distinct
    /// from a transport failure so callers can apply different policies,
    /// even though both currently end in the fallback ranker.
    #[error("backend reply had no usable {0}")]
    MalformedResponse(&'static str),
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Client for a Gemini-style completion endpoint. One POST per call,
/// credential passed as the `key` query parameter.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    credential: ApiCredential,
    config: ClientConfig,
}

impl GeminiClient {
    pub fn new(credential: ApiCredential, config: ClientConfig) -> Result<Self, InferenceError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| InferenceError::Transport {
            status: None,
            detail: format!("could not build HTTP client: {e}"),
        })?;

        Ok(Self {
            http,
            credential,
            config,
        })
    }
}

#[async_trait]
impl CompletionBackend for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, InferenceError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: self.config.generation,
        };

        debug!(endpoint = %self.config.endpoint, prompt_bytes = prompt.len(), "dispatching completion request");

        let response = self
            .http
            .post(self.config.endpoint.clone())
            .query(&[("key", self.credential.expose())])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let detail = if e.is_timeout() {
                    "request timed out".to_string()
                } else if e.is_connect() {
                    "connection failed".to_string()
                } else {
                    e.to_string()
                };
                InferenceError::Transport {
                    status: e.status().map(|s| s.as_u16()),
                    detail,
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(InferenceError::Transport {
                status: Some(status.as_u16()),
                detail: format!("HTTP {status}: {body}"),
            });
        }

        let envelope: GenerateContentResponse = response
            .json()
            .await
            .map_err(|_| InferenceError::MalformedResponse("JSON body"))?;

        let text = envelope
            .candidates
            .into_iter()
            .next()
            .ok_or(InferenceError::MalformedResponse("candidate"))?
            .content
            .ok_or(InferenceError::MalformedResponse("content"))?
            .parts
            .into_iter()
            .next()
            .ok_or(InferenceError::MalformedResponse("part"))?
            .text
            .ok_or(InferenceError::MalformedResponse("text"))?;

        debug!(reply_bytes = text.len(), "completion received");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server, ServerGuard};
    use url::Url;

    const ROUTE: &str = "/v1beta/models/test:generateContent";

    fn client_for(server: &ServerGuard) -> GeminiClient {
        let config = ClientConfig {
            endpoint: Url::parse(&format!("{}{ROUTE}", server.url())).unwrap(),
            ..ClientConfig::default()
        };
        GeminiClient::new(ApiCredential::new("test-key"), config).unwrap()
    }

    fn reply_envelope(text: &str) -> String {
        serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        })
        .to_string()
    }

    #[tokio::test]
    async fn returns_reply_text_on_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", ROUTE)
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(reply_envelope(r#"{"analysis":"ok","recommendations":[]}"#))
            .create_async()
            .await;

        let client = client_for(&server);
        let reply = client.complete("prompt").await.unwrap();

        assert_eq!(reply, r#"{"analysis":"ok","recommendations":[]}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn sends_generation_config_in_request_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", ROUTE)
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .match_body(Matcher::PartialJson(serde_json::json!({
                "contents": [{ "parts": [{ "text": "prompt" }] }],
                "generationConfig": { "topK": 40, "maxOutputTokens": 2048 }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(reply_envelope("{}"))
            .create_async()
            .await;

        let client = client_for(&server);
        client.complete("prompt").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_a_transport_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", ROUTE)
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("backend exploded")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.complete("prompt").await.unwrap_err();

        match err {
            InferenceError::Transport { status, detail } => {
                assert_eq!(status, Some(500));
                assert!(detail.contains("backend exploded"));
            }
            other => panic!("expected transport failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_failure() {
        // Port 9 (discard) is not listening; the connect fails outright.
        let config = ClientConfig {
            endpoint: Url::parse("http://127.0.0.1:9/generate").unwrap(),
            ..ClientConfig::default()
        };
        let client = GeminiClient::new(ApiCredential::new("test-key"), config).unwrap();

        let err = client.complete("prompt").await.unwrap_err();
        match err {
            InferenceError::Transport { status, .. } => assert!(status.is_none()),
            other => panic!("expected transport failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_candidates_is_malformed() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", ROUTE)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.complete("prompt").await.unwrap_err();

        assert!(matches!(
            err,
            InferenceError::MalformedResponse("candidate")
        ));
    }

    #[tokio::test]
    async fn missing_text_part_is_malformed() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", ROUTE)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[{"content":{"parts":[{}]}}]}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.complete("prompt").await.unwrap_err();

        assert!(matches!(err, InferenceError::MalformedResponse("text")));
    }

    #[tokio::test]
    async fn non_json_success_body_is_malformed() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", ROUTE)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<!doctype html><html>not json</html>")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.complete("prompt").await.unwrap_err();

        assert!(matches!(
            err,
            InferenceError::MalformedResponse("JSON body")
        ));
    }
}
