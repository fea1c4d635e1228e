//! Turns the backend's raw reply text into a validated advisory draft.
//!
//! Replies are supposed to be bare JSON, but models routinely wrap the
//! payload in markdown fences or a line of prose anyway. The parser
//! unwraps those before decoding strictly.

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::advisor::RecommendationStub;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No JSON could be decoded from the reply, wrapped or not. The
    /// transport round trip succeeded; the backend broke its contract.
    #[error("reply text is not parseable JSON")]
    UnparsableResponse,
    /// The reply decoded, but the advisory shape is wrong.
    #[error("reply JSON is missing {0}")]
    InvalidSchema(&'static str),
}

/// Parsed but not yet enriched advisory: the backend's analysis plus the
/// raw per-product stubs that still need a catalog join.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisoryDraft {
    pub analysis: String,
    pub stubs: Vec<RecommendationStub>,
}

/// Decode one backend reply into an [`AdvisoryDraft`].
///
/// Individual `recommendations` entries that fail to decode are dropped
/// with a warning rather than failing the whole reply. Enrichment deals
/// with identifiers that do not resolve.
pub fn parse_advisory(reply: &str) -> Result<AdvisoryDraft, ParseError> {
    let payload = extract_json(reply).ok_or(ParseError::UnparsableResponse)?;
    let value: Value =
        serde_json::from_str(payload).map_err(|_| ParseError::UnparsableResponse)?;

    let root = value
        .as_object()
        .ok_or(ParseError::InvalidSchema("a top-level object"))?;

    let analysis = root
        .get("analysis")
        .and_then(Value::as_str)
        .ok_or(ParseError::InvalidSchema("an analysis string"))?
        .to_string();

    let entries = root
        .get("recommendations")
        .ok_or(ParseError::InvalidSchema("a recommendations field"))?
        .as_array()
        .ok_or(ParseError::InvalidSchema("a recommendations array"))?;

    let mut stubs = Vec::with_capacity(entries.len());
    for entry in entries {
        match serde_json::from_value::<RecommendationStub>(entry.clone()) {
            Ok(stub) => stubs.push(stub),
            Err(e) => warn!(error = %e, "dropping undecodable recommendation entry"),
        }
    }

    Ok(AdvisoryDraft { analysis, stubs })
}

/// Locate the JSON payload inside a possibly-wrapped reply: a fenced
/// json block if present, otherwise the outermost brace span. The brace
/// span also covers unlabeled fences and prose-wrapped bodies.
fn extract_json(reply: &str) -> Option<&str> {
    let trimmed = reply.trim();

    if let Some(fence) = trimmed.find("```json") {
        let start = fence + "```json".len();
        if let Some(len) = trimmed[start..].find("```") {
            return Some(trimmed[start..start + len].trim());
        }
    }

    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if end > start => Some(trimmed[start..=end].trim()),
        _ => None,
    }
}
