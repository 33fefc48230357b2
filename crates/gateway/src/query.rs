//! Query Builder: caller input to a fully-formed backend request.

use convogate_core::{DetectIntentRequest, Error, QueryInput, Result};

/// Builds detect-intent requests from one of the three input kinds.
///
/// Holds the process-wide project id and the default language code;
/// constructed once at startup and shared read-only by the handlers.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    project_id: String,
    language_code: String,
}

impl QueryBuilder {
    /// Create a builder for one backend project.
    pub fn new(project_id: impl Into<String>, language_code: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            language_code: language_code.into(),
        }
    }

    /// Build a request from a typed utterance.
    pub fn text(&self, session_id: &str, text: impl Into<String>) -> Result<DetectIntentRequest> {
        self.build(
            session_id,
            QueryInput::Text {
                text: text.into(),
                language_code: self.language_code.clone(),
            },
        )
    }

    /// Build a request from a symbolic event name.
    pub fn event(&self, session_id: &str, name: impl Into<String>) -> Result<DetectIntentRequest> {
        self.build(
            session_id,
            QueryInput::Event {
                name: name.into(),
                language_code: self.language_code.clone(),
            },
        )
    }

    /// Build a request from raw audio bytes.
    pub fn audio(&self, session_id: &str, audio: Vec<u8>) -> Result<DetectIntentRequest> {
        self.build(
            session_id,
            QueryInput::Audio {
                audio,
                language_code: self.language_code.clone(),
            },
        )
    }

    fn build(&self, session_id: &str, query: QueryInput) -> Result<DetectIntentRequest> {
        if self.project_id.is_empty() || session_id.is_empty() {
            return Err(Error::invalid_argument("received empty project or session"));
        }
        Ok(DetectIntentRequest {
            session: self.session_path(session_id),
            query,
        })
    }

    /// Session path scoping a turn to backend conversational state.
    ///
    /// This derivation is the sole binding between a caller's multi-turn
    /// conversation and backend-side state: callers supply a stable id
    /// across turns of one conversation and a fresh one to start another.
    fn session_path(&self, session_id: &str) -> String {
        format!(
            "projects/{}/agent/sessions/{}",
            self.project_id, session_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> QueryBuilder {
        QueryBuilder::new("my-project", "en")
    }

    #[test]
    fn session_path_is_derived_for_every_input_kind() {
        let requests = [
            builder().text("s1", "hello").unwrap(),
            builder().event("s1", "welcome").unwrap(),
            builder().audio("s1", vec![0u8; 4]).unwrap(),
        ];
        for request in requests {
            assert_eq!(request.session, "projects/my-project/agent/sessions/s1");
        }
    }

    #[test]
    fn text_payload_and_language_are_carried_verbatim() {
        let request = builder().text("s1", "book a table").unwrap();
        assert_eq!(
            request.query,
            QueryInput::Text {
                text: "book a table".to_string(),
                language_code: "en".to_string(),
            }
        );
    }

    #[test]
    fn empty_session_is_rejected() {
        let err = builder().text("", "hello").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn empty_project_is_rejected() {
        let empty = QueryBuilder::new("", "en");
        let err = empty.event("s1", "welcome").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn audio_bytes_pass_through_untouched() {
        let payload = vec![0x52, 0x49, 0x46, 0x46];
        let request = builder().audio("s1", payload.clone()).unwrap();
        match request.query {
            QueryInput::Audio { audio, .. } => assert_eq!(audio, payload),
            other => panic!("expected audio variant, got {:?}", other),
        }
    }
}
