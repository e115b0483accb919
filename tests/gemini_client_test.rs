//! Integration tests for the Gemini HTTP adapter against a mock server.

use serde_json::json;
use tokio_util::sync::CancellationToken;

use crucible::domain::models::AgentRole;
use crucible::domain::ports::{InvokeError, InvokeRequest, ModelInvoker};
use crucible::infrastructure::gemini::{GeminiClient, GeminiClientConfig};

fn client_for(server: &mockito::Server) -> GeminiClient {
    GeminiClient::new(GeminiClientConfig {
        api_key: "test-key".to_string(),
        base_url: server.url(),
        timeout_secs: 5,
    })
    .unwrap()
}

fn request() -> InvokeRequest {
    InvokeRequest::new(AgentRole::Planner, "gemini-1.5-flash", 0.7, "ping")
}

fn success_body(text: &str) -> String {
    json!({
        "candidates": [{
            "content": {
                "parts": [{"text": text}],
                "role": "model"
            },
            "finishReason": "STOP"
        }],
        "usageMetadata": {
            "promptTokenCount": 4,
            "candidatesTokenCount": 12,
            "totalTokenCount": 16
        }
    })
    .to_string()
}

#[tokio::test]
async fn test_successful_generation_returns_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
        .match_header("x-goog-api-key", "test-key")
        .match_body(mockito::Matcher::PartialJson(json!({
            "contents": [{"parts": [{"text": "ping"}]}],
            "generationConfig": {"temperature": 0.7}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(success_body("pong"))
        .create_async()
        .await;

    let text = client_for(&server).invoke(request()).await.unwrap();
    assert_eq!(text, "pong");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_multi_part_candidate_is_concatenated() {
    let mut server = mockito::Server::new_async().await;
    let body = json!({
        "candidates": [{
            "content": {
                "parts": [{"text": "first "}, {"text": "second"}]
            }
        }]
    })
    .to_string();
    server
        .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;

    let text = client_for(&server).invoke(request()).await.unwrap();
    assert_eq!(text, "first second");
}

#[tokio::test]
async fn test_unauthorized_maps_to_invalid_api_key() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
        .with_status(401)
        .with_body(json!({"error": {"message": "API key not valid"}}).to_string())
        .create_async()
        .await;

    let err = client_for(&server).invoke(request()).await.unwrap_err();
    assert!(matches!(err, InvokeError::InvalidApiKey));
}

#[tokio::test]
async fn test_forbidden_maps_to_invalid_api_key() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
        .with_status(403)
        .with_body(json!({"error": {"message": "permission denied"}}).to_string())
        .create_async()
        .await;

    let err = client_for(&server).invoke(request()).await.unwrap_err();
    assert!(matches!(err, InvokeError::InvalidApiKey));
}

#[tokio::test]
async fn test_rate_limit_maps_to_rate_limit_exceeded() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
        .with_status(429)
        .with_body(json!({"error": {"message": "quota exceeded"}}).to_string())
        .create_async()
        .await;

    let err = client_for(&server).invoke(request()).await.unwrap_err();
    assert!(matches!(err, InvokeError::RateLimitExceeded));
}

#[tokio::test]
async fn test_bad_request_carries_provider_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
        .with_status(400)
        .with_body(json!({"error": {"message": "unknown field `frobnicate`"}}).to_string())
        .create_async()
        .await;

    let err = client_for(&server).invoke(request()).await.unwrap_err();
    match err {
        InvokeError::InvalidRequest(message) => {
            assert!(message.contains("unknown field"));
        }
        other => panic!("expected InvalidRequest, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_maps_to_api_with_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
        .with_status(503)
        .with_body("upstream unavailable")
        .create_async()
        .await;

    let err = client_for(&server).invoke(request()).await.unwrap_err();
    match err {
        InvokeError::Api { status, message } => {
            assert_eq!(status, 503);
            assert!(message.contains("upstream unavailable"));
        }
        other => panic!("expected Api, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_success_body_is_network_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{ not json ]")
        .create_async()
        .await;

    let err = client_for(&server).invoke(request()).await.unwrap_err();
    assert!(matches!(err, InvokeError::Network(_)));
}

#[tokio::test]
async fn test_no_candidates_is_empty_response() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"candidates": []}).to_string())
        .create_async()
        .await;

    let err = client_for(&server).invoke(request()).await.unwrap_err();
    assert!(matches!(err, InvokeError::EmptyResponse));
}

#[tokio::test]
async fn test_pre_cancelled_token_skips_the_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
        .expect(0)
        .with_status(200)
        .with_body(success_body("never served"))
        .create_async()
        .await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = client_for(&server)
        .invoke(request().with_cancel(cancel))
        .await
        .unwrap_err();
    assert!(matches!(err, InvokeError::Cancelled));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_model_name_selects_endpoint() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/gemini-1.5-pro:generateContent")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(success_body("from pro"))
        .create_async()
        .await;

    let req = InvokeRequest::new(AgentRole::Executive, "gemini-1.5-pro", 0.2, "ping");
    let text = client_for(&server).invoke(req).await.unwrap();
    assert_eq!(text, "from pro");
    mock.assert_async().await;
}
