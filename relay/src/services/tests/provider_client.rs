//! Tests for RealProviderClient against mocked vendor endpoints

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared::{ApiFailure, ProviderId, RelayConfig};

use crate::services::provider_client::RealProviderClient;
use crate::traits::ProviderClient;

fn config_for(server: &MockServer) -> RelayConfig {
    let base = server.uri().parse().unwrap();
    RelayConfig {
        openai_api_key: Some("sk-test".to_string()),
        anthropic_api_key: Some("ak-test".to_string()),
        openai_base_url: base,
        anthropic_base_url: server.uri().parse().unwrap(),
        ..RelayConfig::default()
    }
}

#[tokio::test]
async fn test_openai_request_and_parsing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "messages": [{ "role": "user", "content": "hello there" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "gpt-4o-mini-2024-07-18",
            "choices": [{ "message": { "role": "assistant", "content": "Hi from OpenAI" } }],
            "usage": { "prompt_tokens": 12, "completion_tokens": 5, "total_tokens": 17 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = RealProviderClient::new(config_for(&server)).unwrap();
    let response = client.generate(ProviderId::OpenAI, "hello there").await.unwrap();

    assert_eq!(response.provider, ProviderId::OpenAI);
    assert_eq!(response.content, "Hi from OpenAI");
    assert_eq!(response.model_used, "gpt-4o-mini-2024-07-18");
    assert_eq!(response.usage.input_tokens, 12);
    assert_eq!(response.usage.output_tokens, 5);
    assert_eq!(response.usage.total(), 17);
}

#[tokio::test]
async fn test_anthropic_request_and_parsing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "ak-test"))
        .and(header("anthropic-version", "2023-06-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{ "type": "text", "text": "Hi from Claude" }],
            "usage": { "input_tokens": 20, "output_tokens": 8 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = RealProviderClient::new(config_for(&server)).unwrap();
    let response = client.generate(ProviderId::Anthropic, "hello").await.unwrap();

    assert_eq!(response.content, "Hi from Claude");
    // No model in the payload: falls back to the configured one
    assert_eq!(response.model_used, shared::config::DEFAULT_ANTHROPIC_MODEL);
    assert_eq!(response.usage.total(), 28);
}

#[tokio::test]
async fn test_base_url_path_prefix_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "via gateway" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/anthropic/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{ "type": "text", "text": "via gateway too" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.openai_base_url = format!("{}/openai", server.uri()).parse().unwrap();
    config.anthropic_base_url = format!("{}/anthropic/", server.uri()).parse().unwrap();
    let client = RealProviderClient::new(config).unwrap();

    let response = client.generate(ProviderId::OpenAI, "hello").await.unwrap();
    assert_eq!(response.content, "via gateway");
    let response = client.generate(ProviderId::Anthropic, "hello").await.unwrap();
    assert_eq!(response.content, "via gateway too");

    let paths: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|request| request.url.path().to_string())
        .collect();
    assert_eq!(paths, vec!["/openai/v1/chat/completions", "/anthropic/v1/messages"]);
}

#[tokio::test]
async fn test_missing_usage_defaults_to_zero() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "ok" } }]
        })))
        .mount(&server)
        .await;

    let client = RealProviderClient::new(config_for(&server)).unwrap();
    let response = client.generate(ProviderId::OpenAI, "ping").await.unwrap();
    assert_eq!(response.usage.total(), 0);
}

#[tokio::test]
async fn test_missing_api_key_fails_without_network() {
    let server = MockServer::start().await;
    let mut config = config_for(&server);
    config.anthropic_api_key = None;

    let client = RealProviderClient::new(config).unwrap();
    assert!(client.is_configured(ProviderId::OpenAI));
    assert!(!client.is_configured(ProviderId::Anthropic));

    let result = client.generate(ProviderId::Anthropic, "hello").await;
    assert_eq!(result.unwrap_err(), ApiFailure::MissingApiKey(ProviderId::Anthropic));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_http_failures_are_classified() {
    let cases = [
        (401, ApiFailure::AuthenticationFailed),
        (429, ApiFailure::RateLimitExceeded),
        (503, ApiFailure::ServiceUnavailable),
    ];

    for (status, expected) in cases {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let client = RealProviderClient::new(config_for(&server)).unwrap();
        let result = client.generate(ProviderId::OpenAI, "hello").await;
        assert_eq!(result.unwrap_err(), expected, "status {status}");
    }
}

#[tokio::test]
async fn test_server_error_keeps_body_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let client = RealProviderClient::new(config_for(&server)).unwrap();
    match client.generate(ProviderId::Anthropic, "hello").await {
        Err(ApiFailure::ServerError(detail)) => {
            assert!(detail.contains("anthropic"));
            assert!(detail.contains("upstream exploded"));
        }
        other => panic!("expected server error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_response_without_content_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let client = RealProviderClient::new(config_for(&server)).unwrap();
    let result = client.generate(ProviderId::OpenAI, "hello").await;
    assert!(matches!(result, Err(ApiFailure::InvalidResponse(_))));
}
