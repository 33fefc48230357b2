//! Wire-format mapping for the detect-intent REST contract.
//!
//! The REST surface uses camelCase field names and base64 strings for
//! byte fields; this module converts between that shape and the domain
//! types in `convogate_core`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use convogate_core::config::AudioConfig;
use convogate_core::{
    DetectIntentRequest, DetectIntentResponse, Error, FulfillmentMessage, Intent, QueryInput,
    QueryResult, Result,
};

// =============================================================================
// Request Side
// =============================================================================

/// Body of a `:detectIntent` call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectIntentBody {
    pub query_input: WireQueryInput,
    /// Base64 audio payload; present only for audio queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_audio: Option<String>,
}

/// One-of query input on the wire.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireQueryInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<WireTextInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<WireEventInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_config: Option<WireAudioConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTextInput {
    pub text: String,
    pub language_code: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireEventInput {
    pub name: String,
    pub language_code: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireAudioConfig {
    pub audio_encoding: String,
    pub sample_rate_hertz: u32,
    pub language_code: String,
}

impl DetectIntentBody {
    /// Build the wire body for one domain request. Audio parameters come
    /// from deployment configuration, not from the caller.
    pub fn from_request(request: &DetectIntentRequest, audio: &AudioConfig) -> Self {
        match &request.query {
            QueryInput::Text {
                text,
                language_code,
            } => Self {
                query_input: WireQueryInput {
                    text: Some(WireTextInput {
                        text: text.clone(),
                        language_code: language_code.clone(),
                    }),
                    ..Default::default()
                },
                input_audio: None,
            },
            QueryInput::Event {
                name,
                language_code,
            } => Self {
                query_input: WireQueryInput {
                    event: Some(WireEventInput {
                        name: name.clone(),
                        language_code: language_code.clone(),
                    }),
                    ..Default::default()
                },
                input_audio: None,
            },
            QueryInput::Audio {
                audio: bytes,
                language_code,
            } => Self {
                query_input: WireQueryInput {
                    audio_config: Some(WireAudioConfig {
                        audio_encoding: wire_encoding(&audio.encoding),
                        sample_rate_hertz: audio.sample_rate_hertz,
                        language_code: language_code.clone(),
                    }),
                    ..Default::default()
                },
                input_audio: Some(STANDARD.encode(bytes)),
            },
        }
    }
}

/// Map the configured encoding name to its wire enum value. Unknown
/// names pass through untouched so deployments can set the wire value
/// directly.
fn wire_encoding(encoding: &str) -> String {
    match encoding {
        "linear16" => "AUDIO_ENCODING_LINEAR_16".to_string(),
        "flac" => "AUDIO_ENCODING_FLAC".to_string(),
        "mulaw" => "AUDIO_ENCODING_MULAW".to_string(),
        "ogg_opus" => "AUDIO_ENCODING_OGG_OPUS".to_string(),
        other => other.to_string(),
    }
}

// =============================================================================
// Reply Side
// =============================================================================

/// Reply of a `:detectIntent` call.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetectIntentReply {
    pub response_id: String,
    pub query_result: WireQueryResult,
    /// Base64 synthesized audio, empty when absent.
    pub output_audio: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WireQueryResult {
    pub query_text: String,
    pub fulfillment_text: String,
    /// Kept as raw values; the shapes behind this list are
    /// backend-defined.
    pub fulfillment_messages: Vec<serde_json::Value>,
    pub intent: Option<WireIntent>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WireIntent {
    pub name: String,
    pub display_name: String,
}

impl DetectIntentReply {
    /// Convert the wire reply into the domain mirror.
    pub fn into_domain(self) -> Result<DetectIntentResponse> {
        let output_audio = if self.output_audio.is_empty() {
            Vec::new()
        } else {
            STANDARD
                .decode(&self.output_audio)
                .map_err(|e| Error::backend(format!("invalid output audio encoding: {}", e)))?
        };

        Ok(DetectIntentResponse {
            response_id: self.response_id,
            query_result: QueryResult {
                query_text: self.query_result.query_text,
                fulfillment_text: self.query_result.fulfillment_text,
                fulfillment_messages: self
                    .query_result
                    .fulfillment_messages
                    .into_iter()
                    .map(FulfillmentMessage)
                    .collect(),
                intent: self.query_result.intent.map(|intent| Intent {
                    name: intent.name,
                    display_name: intent.display_name,
                }),
            },
            output_audio,
        })
    }
}
