//! Axum-based HTTP server for the gateway.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use convogate_core::{DetectionResult, Error, Result, SessionClient};

use crate::normalize::normalize;
use crate::query::QueryBuilder;

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Enable CORS (the chat widget is embedded in third-party pages).
    pub enable_cors: bool,
    /// Enable request tracing.
    pub enable_tracing: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_cors: true,
            enable_tracing: true,
        }
    }
}

/// Shared application state.
///
/// Handlers are stateless beyond this: the read-only query builder and
/// the shared Session Client handle.
pub struct AppState {
    /// Query builder (project id + default language).
    pub queries: QueryBuilder,
    /// Session Client shared by all in-flight requests.
    pub client: Arc<dyn SessionClient>,
}

/// Gateway server.
pub struct GatewayServer {
    config: GatewayConfig,
    state: Arc<AppState>,
}

impl GatewayServer {
    /// Create a new gateway server.
    pub fn new(config: GatewayConfig, queries: QueryBuilder, client: Arc<dyn SessionClient>) -> Self {
        Self {
            config,
            state: Arc::new(AppState { queries, client }),
        }
    }

    /// Build the Axum router.
    pub fn build_router(&self) -> Router {
        let mut router = Router::new()
            .route("/healthz", get(health_handler))
            .route("/query/text", post(query_text_handler))
            .route("/query/audio", post(query_audio_handler))
            .route("/query/event", post(query_event_handler))
            // Audio uploads can exceed axum's default 2MB body cap.
            .layer(DefaultBodyLimit::max(32 * 1024 * 1024))
            .with_state(self.state.clone());

        if self.config.enable_cors {
            router = router.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any));
        }

        if self.config.enable_tracing {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }

    /// Run the server.
    pub async fn run(self) -> Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| Error::gateway(format!("Failed to bind: {}", e)))?;

        tracing::info!(addr = %addr, "Gateway server starting");

        axum::serve(listener, self.build_router())
            .await
            .map_err(|e| Error::gateway(format!("Server error: {}", e)))?;

        Ok(())
    }
}

// =============================================================================
// Request/Response Types
// =============================================================================

/// Health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Error envelope returned for every request-time failure.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message, backend diagnostics preserved.
    pub error: String,
}

/// Multipart fields accepted by the query endpoints.
#[derive(Default)]
struct QueryForm {
    q: Option<String>,
    event: Option<String>,
    file: Option<Vec<u8>>,
    session: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check handler.
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Text query handler: `q` + `session`.
async fn query_text_handler(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Response {
    let trace_id = Uuid::new_v4().to_string();

    let result: Result<DetectionResult> = async {
        let form = read_form(multipart).await?;
        let request = state
            .queries
            .text(&form.session.unwrap_or_default(), form.q.unwrap_or_default())?;

        tracing::info!(trace_id = %trace_id, session = %request.session, "Dispatching text query");

        let reply = state.client.detect_intent(&request).await?;
        normalize(&reply)
    }
    .await;

    respond(&trace_id, result)
}

/// Audio query handler: `file` + `session`.
async fn query_audio_handler(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Response {
    let trace_id = Uuid::new_v4().to_string();

    let result: Result<DetectionResult> = async {
        let form = read_form(multipart).await?;
        let audio = form
            .file
            .ok_or_else(|| Error::invalid_argument("cannot get the file from the form post"))?;
        let request = state
            .queries
            .audio(&form.session.unwrap_or_default(), audio)?;

        tracing::info!(trace_id = %trace_id, session = %request.session, "Dispatching audio query");

        let reply = state.client.detect_intent(&request).await?;
        normalize(&reply)
    }
    .await;

    respond(&trace_id, result)
}

/// Event query handler: `event` + `session`.
async fn query_event_handler(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Response {
    let trace_id = Uuid::new_v4().to_string();

    let result: Result<DetectionResult> = async {
        let form = read_form(multipart).await?;
        let request = state
            .queries
            .event(&form.session.unwrap_or_default(), form.event.unwrap_or_default())?;

        tracing::info!(trace_id = %trace_id, session = %request.session, "Dispatching event query");

        let reply = state.client.detect_intent(&request).await?;
        normalize(&reply)
    }
    .await;

    respond(&trace_id, result)
}

/// Read the multipart form, keeping only the fields the query endpoints
/// know about.
async fn read_form(mut multipart: Multipart) -> Result<QueryForm> {
    let mut form = QueryForm::default();

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "q" => form.q = Some(field.text().await.map_err(malformed)?),
            "event" => form.event = Some(field.text().await.map_err(malformed)?),
            "session" => form.session = Some(field.text().await.map_err(malformed)?),
            "file" => form.file = Some(field.bytes().await.map_err(malformed)?.to_vec()),
            _ => {}
        }
    }

    Ok(form)
}

fn malformed(err: axum::extract::multipart::MultipartError) -> Error {
    Error::invalid_argument(format!("malformed multipart input: {}", err))
}

/// Serialize the outcome of one dispatch sequence.
fn respond(trace_id: &str, result: Result<DetectionResult>) -> Response {
    match result {
        Ok(detection) => (StatusCode::OK, Json(detection)).into_response(),
        Err(e) => {
            tracing::error!(trace_id = %trace_id, error = %e, "Query dispatch failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
