use serde::{Deserialize, Serialize};

// =============================================================================
// Query-Side Types
// =============================================================================

/// One caller input for a detect-intent turn.
///
/// Exactly one variant is populated per request, and the language code
/// travels with the variant so a request is self-contained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum QueryInput {
    /// A typed utterance, forwarded as-is.
    Text {
        /// Literal utterance text.
        text: String,
        /// Language the utterance is in.
        language_code: String,
    },

    /// A symbolic event name; triggers backend logic without
    /// natural-language input.
    Event {
        /// Event name known to the backend agent.
        name: String,
        /// Language for the backend's reply.
        language_code: String,
    },

    /// Recorded audio, passed through verbatim. Encoding and sample rate
    /// are deployment constants, not negotiated per request.
    Audio {
        /// Raw audio bytes.
        audio: Vec<u8>,
        /// Language spoken in the audio.
        language_code: String,
    },
}

impl QueryInput {
    /// Language code carried by whichever variant is populated.
    pub fn language_code(&self) -> &str {
        match self {
            Self::Text { language_code, .. }
            | Self::Event { language_code, .. }
            | Self::Audio { language_code, .. } => language_code,
        }
    }
}

/// A fully-formed request for the Session Client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectIntentRequest {
    /// Session path binding this turn to backend conversational state,
    /// of the form `projects/{projectId}/agent/sessions/{sessionId}`.
    pub session: String,

    /// The single populated input variant.
    pub query: QueryInput,
}
