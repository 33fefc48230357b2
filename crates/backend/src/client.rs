//! REST Session Client for the remote detect-intent backend.

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};

use convogate_core::config::{AudioConfig, BackendConfig};
use convogate_core::{
    DetectIntentRequest, DetectIntentResponse, Error, Result, SessionClient,
};

use crate::wire;

/// Session Client over the detect-intent REST surface.
///
/// Wraps one shared `reqwest::Client`; its connection pool multiplexes
/// concurrent calls, so a single instance serves all in-flight requests.
pub struct HttpSessionClient {
    http: reqwest::Client,
    base_url: String,
    api_token: Option<Secret<String>>,
    audio: AudioConfig,
}

impl HttpSessionClient {
    /// Construct a client for one backend deployment. Fatal only at
    /// startup, before serving begins.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::backend(format!("could not build backend client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
            audio: config.audio.clone(),
        })
    }

    fn detect_intent_url(&self, session: &str) -> String {
        format!("{}/v2/{}:detectIntent", self.base_url, session)
    }
}

#[async_trait]
impl SessionClient for HttpSessionClient {
    async fn detect_intent(&self, request: &DetectIntentRequest) -> Result<DetectIntentResponse> {
        let url = self.detect_intent_url(&request.session);
        let body = wire::DetectIntentBody::from_request(request, &self.audio);

        tracing::debug!(url = %url, "Calling detect-intent backend");

        let mut call = self.http.post(&url).json(&body);
        if let Some(token) = &self.api_token {
            call = call.bearer_auth(token.expose_secret());
        }

        let response = call
            .send()
            .await
            .map_err(|e| Error::backend(format!("detect intent call failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            // Surface the backend's own diagnostic body verbatim.
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::backend(format!(
                "backend returned {}: {}",
                status, detail
            )));
        }

        let reply: wire::DetectIntentReply = response
            .json()
            .await
            .map_err(|e| Error::backend(format!("could not decode backend reply: {}", e)))?;

        reply.into_domain()
    }
}
