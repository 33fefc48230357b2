//! Mock implementations of core traits for testing.
//!
//! This module provides a scripted Session Client used by gateway unit
//! and integration tests, so the dispatch layer can be exercised without
//! a live backend.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::{
    traits::SessionClient,
    types::{DetectIntentRequest, DetectIntentResponse},
    Error, Result,
};

/// One scripted outcome for the mock client.
enum ScriptedReply {
    Reply(DetectIntentResponse),
    Failure(String),
}

/// Scripted mock Session Client.
///
/// Returns queued outcomes in order, repeating the last one once the
/// queue runs dry, and records every request so tests can assert both
/// what was sent and that validation failures never reach the backend.
pub struct MockSessionClient {
    script: Mutex<Vec<ScriptedReply>>,
    requests: Mutex<Vec<DetectIntentRequest>>,
}

impl MockSessionClient {
    /// Create a mock with a queue of replies.
    pub fn new(replies: Vec<DetectIntentResponse>) -> Self {
        Self {
            script: Mutex::new(replies.into_iter().map(ScriptedReply::Reply).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that always returns the same reply.
    pub fn constant(reply: DetectIntentResponse) -> Self {
        Self::new(vec![reply])
    }

    /// Create a mock that always fails with a backend error.
    pub fn failing(message: &str) -> Self {
        Self {
            script: Mutex::new(vec![ScriptedReply::Failure(message.to_string())]),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Append a failure outcome to the script.
    pub fn then_fail(self, message: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .push(ScriptedReply::Failure(message.to_string()));
        self
    }

    /// Append a reply outcome to the script.
    pub fn then_reply(self, reply: DetectIntentResponse) -> Self {
        self.script.lock().unwrap().push(ScriptedReply::Reply(reply));
        self
    }

    /// Number of detect-intent calls made against this mock.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The most recent request, if any call was made.
    pub fn last_request(&self) -> Option<DetectIntentRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl SessionClient for MockSessionClient {
    async fn detect_intent(&self, request: &DetectIntentRequest) -> Result<DetectIntentResponse> {
        let count = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };

        let script = self.script.lock().unwrap();
        if script.is_empty() {
            return Ok(DetectIntentResponse::default());
        }
        let idx = (count - 1).min(script.len() - 1);
        match &script[idx] {
            ScriptedReply::Reply(reply) => Ok(reply.clone()),
            ScriptedReply::Failure(message) => Err(Error::backend(message.clone())),
        }
    }
}
