//! Collaborator traits for Convogate.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{DetectIntentRequest, DetectIntentResponse};

/// Session-oriented client for the remote detect-intent backend.
///
/// One instance is constructed at startup and shared process-wide behind
/// `Arc<dyn SessionClient>`, so implementations must be safe for
/// concurrent use by many in-flight requests. Errors propagate verbatim
/// to the caller; no retry policy lives at this seam.
#[async_trait]
pub trait SessionClient: Send + Sync {
    /// Send one detect-intent request bound to the request's session path.
    ///
    /// May block on the network. Dropping the returned future cancels the
    /// in-flight call.
    async fn detect_intent(&self, request: &DetectIntentRequest) -> Result<DetectIntentResponse>;
}
