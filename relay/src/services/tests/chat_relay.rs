//! Tests for ChatRelay with a mocked provider client

use std::sync::Arc;
use std::time::Duration;

use shared::{ApiFailure, ChatMeta, ChatRequest, Mode, Priority, ProviderId, TokenUsage};

use crate::core::{BASE_PROMPT, RoutingReason};
use crate::error::RelayError;
use crate::services::chat_relay::ChatRelay;
use crate::traits::MockProviderClient;
use crate::types::ProviderResponse;

fn reply(provider: ProviderId, content: &str) -> ProviderResponse {
    ProviderResponse {
        provider,
        content: content.to_string(),
        usage: TokenUsage { input_tokens: 10, output_tokens: 4 },
        model_used: "test-model".to_string(),
        response_time: Duration::from_millis(5),
    }
}

#[tokio::test]
async fn test_agent_chat_sends_augmented_prompt() {
    let mut client = MockProviderClient::new();
    client
        .expect_generate()
        .withf(|provider, prompt| {
            *provider == ProviderId::OpenAI
                && prompt.starts_with(BASE_PROMPT)
                && prompt.contains("MODE: EXECUTION")
                && prompt.contains("LEGAL INTELLIGENCE MODULE ACTIVE")
                && prompt.contains("Recent conversation:\nearlier question")
                && prompt.ends_with("User: Review my contract")
        })
        .times(1)
        .returning(|provider, _| Ok(reply(provider, "Here is the review")));

    let relay = ChatRelay::new(Arc::new(client), ProviderId::OpenAI);
    let request = ChatRequest {
        message: "Review my contract".to_string(),
        mode: Mode::Execution,
        history: vec!["earlier question".to_string()],
        meta: None,
    };

    let result = relay.agent_chat(&request).await.unwrap();
    assert_eq!(result.reply, "Here is the review");
    assert_eq!(result.provider, ProviderId::OpenAI);
    assert_eq!(result.mode, Mode::Execution);
    assert_eq!(result.modules, vec!["legal".to_string()]);
    assert_eq!(result.usage.total(), 14);
}

#[tokio::test]
async fn test_agent_chat_uses_configured_provider() {
    let mut client = MockProviderClient::new();
    client
        .expect_generate()
        .withf(|provider, _| *provider == ProviderId::Anthropic)
        .times(1)
        .returning(|provider, _| Ok(reply(provider, "ok")));

    let relay = ChatRelay::new(Arc::new(client), ProviderId::Anthropic);
    let request = ChatRequest {
        message: "hello".to_string(),
        ..ChatRequest::default()
    };
    let result = relay.agent_chat(&request).await.unwrap();
    assert_eq!(result.provider, ProviderId::Anthropic);
    assert!(result.modules.is_empty());
}

#[tokio::test]
async fn test_dual_chat_forwards_raw_message_to_routed_provider() {
    let mut client = MockProviderClient::new();
    client
        .expect_generate()
        .withf(|provider, prompt| *provider == ProviderId::Anthropic && prompt == "think hard")
        .times(1)
        .returning(|provider, _| Ok(reply(provider, "deep answer")));

    let relay = ChatRelay::new(Arc::new(client), ProviderId::OpenAI);
    let meta = ChatMeta {
        emotion: None,
        priority: Some(Priority::Reasoning),
    };

    let result = relay.dual_chat("think hard", Some(&meta)).await.unwrap();
    assert_eq!(result.provider, ProviderId::Anthropic);
    assert_eq!(result.reason, RoutingReason::ReasoningPriority);
    assert_eq!(result.reply, "deep answer");
}

#[tokio::test]
async fn test_dual_chat_defaults_to_openai() {
    let mut client = MockProviderClient::new();
    client
        .expect_generate()
        .withf(|provider, _| *provider == ProviderId::OpenAI)
        .times(1)
        .returning(|provider, _| Ok(reply(provider, "quick answer")));

    let relay = ChatRelay::new(Arc::new(client), ProviderId::Anthropic);
    let result = relay.dual_chat("quick one", None).await.unwrap();
    assert_eq!(result.reason, RoutingReason::Default);
}

#[tokio::test]
async fn test_empty_message_is_rejected_before_any_call() {
    let mut client = MockProviderClient::new();
    client.expect_generate().times(0);

    let relay = ChatRelay::new(Arc::new(client), ProviderId::OpenAI);
    let result = relay.dual_chat("   ", None).await;
    assert!(matches!(result, Err(RelayError::EmptyMessage)));

    let result = relay.agent_chat(&ChatRequest::default()).await;
    assert!(matches!(result, Err(RelayError::EmptyMessage)));
}

#[tokio::test]
async fn test_provider_failure_is_wrapped() {
    let mut client = MockProviderClient::new();
    client
        .expect_generate()
        .returning(|_, _| Err(ApiFailure::RateLimitExceeded));

    let relay = ChatRelay::new(Arc::new(client), ProviderId::OpenAI);
    let result = relay.dual_chat("hello", None).await;
    match result {
        Err(RelayError::ProviderError { provider, reason }) => {
            assert_eq!(provider, ProviderId::OpenAI);
            assert_eq!(reason, ApiFailure::RateLimitExceeded);
        }
        other => panic!("expected provider error, got {other:?}"),
    }
}

#[test]
fn test_preview_reports_routing_and_modules() {
    let relay = ChatRelay::new(Arc::new(MockProviderClient::new()), ProviderId::OpenAI)
        .with_base_prompt("BASE");
    let request = ChatRequest {
        message: "I need help with a contract valuation".to_string(),
        mode: Mode::Execution,
        history: Vec::new(),
        meta: None,
    };

    let preview = relay.preview(&request);
    assert_eq!(preview.provider, ProviderId::OpenAI);
    assert_eq!(preview.reason, RoutingReason::Default);
    assert_eq!(preview.agent_provider, ProviderId::OpenAI);
    assert_eq!(preview.modules, vec!["legal".to_string(), "financial".to_string()]);
    assert!(preview.prompt.starts_with("BASE\n\nMODE: EXECUTION"));
}
