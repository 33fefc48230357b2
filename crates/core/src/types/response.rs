use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// =============================================================================
// Raw Reply Mirror
// =============================================================================

/// One fulfillment message from a backend reply.
///
/// The shapes behind the backend's message list are not uniformly typed
/// (plain text, cards, custom payloads, ...), so each element is kept as
/// an opaque tagged blob rather than parsed into a fixed schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FulfillmentMessage(pub serde_json::Value);

impl FulfillmentMessage {
    /// Encode this message to a self-contained JSON string.
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(&self.0)
            .map_err(|e| Error::encoding(format!("could not encode fulfillment message: {}", e)))
    }
}

/// Matched intent descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    /// Fully-qualified intent resource name.
    #[serde(default)]
    pub name: String,

    /// Human-readable intent name.
    #[serde(default)]
    pub display_name: String,
}

/// The backend's per-turn query result.
///
/// Every field defaults to its zero value when the backend omits it;
/// absence is never an error at this layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// The text the backend believes it processed (for audio input this
    /// is the transcription).
    #[serde(default)]
    pub query_text: String,

    /// Best-effort fulfillment text.
    #[serde(default)]
    pub fulfillment_text: String,

    /// Ordered fulfillment messages, possibly empty.
    #[serde(default)]
    pub fulfillment_messages: Vec<FulfillmentMessage>,

    /// Matched intent, absent when nothing matched.
    #[serde(default)]
    pub intent: Option<Intent>,
}

/// Raw reply from the Session Client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectIntentResponse {
    /// Backend-assigned correlation identifier.
    #[serde(default)]
    pub response_id: String,

    /// Per-turn query result.
    #[serde(default)]
    pub query_result: QueryResult,

    /// Synthesized audio reply, empty when the backend returned none.
    #[serde(default)]
    pub output_audio: Vec<u8>,
}

// =============================================================================
// Normalized Response Contract
// =============================================================================

/// The stable response contract returned to client applications.
///
/// Constructed fresh per request from a backend reply, never persisted,
/// never mutated after normalization completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Best-effort fulfillment text (may be empty).
    pub text: String,

    /// Synthesized audio reply bytes, base64 on the JSON boundary.
    #[serde(with = "base64_bytes")]
    pub audio: Vec<u8>,

    /// Echo of the text the backend processed.
    pub original_request: String,

    /// Backend-assigned correlation identifier.
    pub response_id: String,

    /// Raw fulfillment message variants, order preserved.
    pub messages: Vec<FulfillmentMessage>,

    /// Each fulfillment message independently encoded as a
    /// self-contained JSON string, same order as `messages`.
    pub messages_json: Vec<String>,

    /// Matched intent, null when nothing matched.
    pub intent: Option<Intent>,
}

impl DetectionResult {
    /// Serialize to the stable JSON contract.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Error::from)
    }
}

/// Base64 encoding for byte fields crossing the JSON boundary.
pub mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        STANDARD.encode(bytes).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}
