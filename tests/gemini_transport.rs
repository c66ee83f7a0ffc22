use std::sync::Arc;
use std::time::Duration;

use design_council::{
    call_with_retry, generate_with_continuation, request, ApiKey, ErrorKind, ExecCtx,
    FinishIndicator, FinishReason, GeminiTransport, GenerationConfig, RetryPolicy, Transport,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "AIzaSyTEST0123456789abcdef";
const ENDPOINT: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

fn transport(server: &MockServer) -> GeminiTransport {
    GeminiTransport::new(ApiKey::new(KEY).unwrap()).with_base_url(server.uri())
}

fn envelope(text: &str, finish: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {"parts": [{"text": text}], "role": "model"},
            "finishReason": finish
        }],
        "usageMetadata": {"promptTokenCount": 3, "candidatesTokenCount": 5, "totalTokenCount": 8}
    })
}

#[tokio::test]
async fn gemini_success_sends_expected_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(query_param("key", KEY))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "contents": [{"parts": [{"text": "Build a card"}]}],
            "generationConfig": {"maxOutputTokens": 8192, "topK": 40}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope("<div/>", "STOP")))
        .expect(1)
        .mount(&server)
        .await;

    let req = request::build("Build a card", &GenerationConfig::default());
    let envelope = transport(&server).call(&req).await.unwrap();

    assert_eq!(envelope.candidates.len(), 1);
    assert_eq!(envelope.candidates[0].finish_reason, FinishIndicator::Complete);
    assert_eq!(envelope.usage_metadata.unwrap().total_token_count, Some(8));
}

#[tokio::test]
async fn gemini_client_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(401).set_body_string("API key not valid"))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport(&server);
    let req = request::build("hello", &GenerationConfig::default());
    let failure = call_with_retry(&transport, &req, &RetryPolicy::standard(), None, None)
        .await
        .unwrap_err();

    assert_eq!(failure.kind, ErrorKind::ClientError);
    assert_eq!(failure.status, Some(401));
    assert_eq!(failure.message, "API key not valid");
    assert!(!failure.retryable);
    assert!(!failure.to_string().contains(KEY));
}

#[tokio::test]
async fn gemini_server_error_is_retried_until_budget() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .expect(2)
        .mount(&server)
        .await;

    let transport = transport(&server);
    let req = request::build("hello", &GenerationConfig::default());
    let policy = RetryPolicy::new(2).with_initial_delay(Duration::from_millis(10));
    let failure = call_with_retry(&transport, &req, &policy, None, None)
        .await
        .unwrap_err();

    assert_eq!(failure.kind, ErrorKind::ServerOrNetwork);
    assert_eq!(failure.status, Some(503));
    assert!(failure.retryable);
}

#[tokio::test]
async fn gemini_error_without_body_names_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let req = request::build("hello", &GenerationConfig::default());
    let failure = transport(&server).call(&req).await.unwrap_err();

    assert_eq!(failure.kind, ErrorKind::ClientError);
    assert_eq!(failure.message, "HTTP 400");
}

#[tokio::test]
async fn gemini_undecodable_body_is_parse_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
        .mount(&server)
        .await;

    let req = request::build("hello", &GenerationConfig::default());
    let failure = transport(&server).call(&req).await.unwrap_err();

    assert_eq!(failure.kind, ErrorKind::Parse);
    assert!(!failure.retryable);
}

#[tokio::test]
async fn gemini_slow_response_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope("late", "STOP"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = GenerationConfig::default().with_timeout_seconds(1);
    let req = request::build("hello", &config);
    let failure = transport(&server).call(&req).await.unwrap_err();

    assert_eq!(failure.kind, ErrorKind::Timeout);
    assert_eq!(failure.message, "Request timed out after 1 seconds");
    assert!(failure.retryable);
}

#[tokio::test]
async fn gemini_truncated_output_is_continued_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope("function foo() {\n  return", "MAX_TOKENS")),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(" 1;\n}", "STOP")))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = ExecCtx::builder(Arc::new(transport(&server))).build();
    let response = generate_with_continuation(&ctx, "http", "Write foo", &GenerationConfig::default())
        .await
        .unwrap();

    assert_eq!(response.text, "function foo() {\n  return 1;\n}");
    assert_eq!(response.finish_reason, FinishReason::Complete);
    assert_eq!(response.continuations, 1);
    assert_eq!(response.usage.unwrap().total_token_count, Some(16));
}
