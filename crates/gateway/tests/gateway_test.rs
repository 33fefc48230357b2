use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use convogate_core::mocks::MockSessionClient;
use convogate_core::{DetectIntentResponse, FulfillmentMessage, Intent, QueryInput, QueryResult};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const BOUNDARY: &str = "convogate-test-boundary";

// ============================================================================
// Helpers
// ============================================================================

fn app(client: Arc<MockSessionClient>) -> Router {
    let server = convogate_gateway::GatewayServer::new(
        convogate_gateway::GatewayConfig::default(),
        convogate_gateway::QueryBuilder::new("test-project", "en"),
        client,
    );
    server.build_router()
}

fn multipart_request(uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
            BOUNDARY, name, value
        ));
    }
    body.push_str(&format!("--{}--\r\n", BOUNDARY));

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

fn audio_upload_request(session: &str, audio: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"turn.wav\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n",
            BOUNDARY
        )
        .as_bytes(),
    );
    body.extend_from_slice(audio);
    body.extend_from_slice(
        format!(
            "\r\n--{}\r\nContent-Disposition: form-data; name=\"session\"\r\n\r\n{}\r\n--{}--\r\n",
            BOUNDARY, session, BOUNDARY
        )
        .as_bytes(),
    );

    Request::builder()
        .method("POST")
        .uri("/query/audio")
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn greeting_reply() -> DetectIntentResponse {
    DetectIntentResponse {
        response_id: "r-1".to_string(),
        query_result: QueryResult {
            query_text: "hello".to_string(),
            fulfillment_text: "hi!".to_string(),
            fulfillment_messages: vec![
                FulfillmentMessage(json!({"text": {"text": ["hi!"]}})),
                FulfillmentMessage(json!({"payload": {"kind": "card"}})),
            ],
            intent: Some(Intent {
                name: "projects/test-project/agent/intents/1".to_string(),
                display_name: "greeting".to_string(),
            }),
        },
        output_audio: vec![1, 2, 3],
    }
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let client = Arc::new(MockSessionClient::new(Vec::new()));
    let response = app(client)
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_text_query_returns_fulfillment_text() {
    let client = Arc::new(MockSessionClient::constant(greeting_reply()));
    let response = app(client.clone())
        .oneshot(multipart_request(
            "/query/text",
            &[("q", "hello"), ("session", "s1")],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["text"], "hi!");
    assert_eq!(json["original_request"], "hello");
    assert_eq!(json["response_id"], "r-1");
    assert_eq!(json["intent"]["display_name"], "greeting");

    // Both message projections preserve count and order.
    assert_eq!(json["messages"].as_array().unwrap().len(), 2);
    assert_eq!(json["messages_json"].as_array().unwrap().len(), 2);
    let first: Value = serde_json::from_str(json["messages_json"][0].as_str().unwrap()).unwrap();
    assert_eq!(first["text"]["text"][0], "hi!");

    // The session path is the sole binding to backend state.
    assert_eq!(client.call_count(), 1);
    let request = client.last_request().unwrap();
    assert_eq!(request.session, "projects/test-project/agent/sessions/s1");
    assert!(matches!(request.query, QueryInput::Text { .. }));
}

#[tokio::test]
async fn test_event_query_without_matched_intent() {
    let reply = DetectIntentResponse {
        response_id: "r-2".to_string(),
        query_result: QueryResult {
            query_text: String::new(),
            fulfillment_text: "welcome!".to_string(),
            fulfillment_messages: Vec::new(),
            intent: None,
        },
        output_audio: Vec::new(),
    };
    let client = Arc::new(MockSessionClient::constant(reply));
    let response = app(client.clone())
        .oneshot(multipart_request(
            "/query/event",
            &[("event", "welcome"), ("session", "s2")],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["text"], "welcome!");
    assert_eq!(json["intent"], Value::Null);

    let request = client.last_request().unwrap();
    assert_eq!(request.session, "projects/test-project/agent/sessions/s2");
    assert!(matches!(request.query, QueryInput::Event { .. }));
}

#[tokio::test]
async fn test_audio_query_passes_bytes_through() {
    let client = Arc::new(MockSessionClient::constant(greeting_reply()));
    let payload = b"RIFF....WAVEfmt ";
    let response = app(client.clone())
        .oneshot(audio_upload_request("s3", payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    // Output audio survives as base64.
    assert_eq!(json["audio"], "AQID");

    match client.last_request().unwrap().query {
        QueryInput::Audio { audio, .. } => assert_eq!(audio, payload.to_vec()),
        other => panic!("expected audio query, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_session_is_rejected_before_any_backend_call() {
    let client = Arc::new(MockSessionClient::constant(greeting_reply()));
    let response = app(client.clone())
        .oneshot(audio_upload_request("", b"RIFF"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("empty project or session"));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_missing_audio_attachment_is_rejected() {
    let client = Arc::new(MockSessionClient::constant(greeting_reply()));
    let response = app(client.clone())
        .oneshot(multipart_request("/query/audio", &[("session", "s1")]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("file"));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_backend_error_is_surfaced_and_serving_continues() {
    let client = Arc::new(
        MockSessionClient::failing("rpc error: code = Unavailable desc = transport is closing")
            .then_reply(greeting_reply()),
    );
    let app = app(client.clone());

    let response = app
        .clone()
        .oneshot(multipart_request(
            "/query/text",
            &[("q", "hello"), ("session", "s1")],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Unavailable"));

    // The failure is scoped to its request; the next one succeeds.
    let response = app
        .oneshot(multipart_request(
            "/query/text",
            &[("q", "hello"), ("session", "s1")],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(client.call_count(), 2);
}

#[tokio::test]
async fn test_normalized_output_is_stable_across_identical_replies() {
    let client = Arc::new(MockSessionClient::constant(greeting_reply()));
    let app = app(client);

    let mut bodies = Vec::new();
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(multipart_request(
                "/query/text",
                &[("q", "hello"), ("session", "s1")],
            ))
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        bodies.push(bytes);
    }
    assert_eq!(bodies[0], bodies[1]);
}
