//! HTTP client for the two text-generation vendors

use std::time::{Duration, Instant};

use async_trait::async_trait;
use shared::{
    ApiFailure, ProcessId, ProviderId, RelayConfig, TokenUsage, process_debug, process_warn,
};

use crate::error::{RelayError, RelayResult};
use crate::traits::ProviderClient;
use crate::types::ProviderResponse;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Real provider client backed by a pooled reqwest client
#[derive(Clone)]
pub struct RealProviderClient {
    client: reqwest::Client,
    config: RelayConfig,
}

impl RealProviderClient {
    /// Create new provider client with the configured request timeout
    pub fn new(config: RelayConfig) -> RelayResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| RelayError::ConfigError {
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Append `path` to the provider base URL, keeping any path prefix on the base
    fn endpoint(&self, provider: ProviderId, path: &str) -> Result<reqwest::Url, ApiFailure> {
        let mut url = self.config.base_url(provider).clone();
        url.path_segments_mut()
            .map_err(|_| {
                ApiFailure::NetworkError(format!("Base URL for {provider} cannot carry a path"))
            })?
            .pop_if_empty()
            .extend(path.split('/'));
        Ok(url)
    }

    fn api_key(&self, provider: ProviderId) -> Result<&str, ApiFailure> {
        self.config
            .api_key(provider)
            .ok_or(ApiFailure::MissingApiKey(provider))
    }

    /// Make OpenAI chat completion request (private helper)
    async fn make_openai_request(&self, prompt: &str) -> Result<ProviderResponse, ApiFailure> {
        let provider = ProviderId::OpenAI;
        let api_key = self.api_key(provider)?;
        let generation = self.config.generation_config(provider);
        let url = self.endpoint(provider, "v1/chat/completions")?;

        let request_body = serde_json::json!({
            "model": generation.model,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ],
            "max_tokens": generation.max_tokens,
            "temperature": generation.temperature
        });

        let request_start = Instant::now();
        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(network_failure)?;

        let response_json = read_success_json(provider, response).await?;
        let response_time = request_start.elapsed();

        let content = response_json
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .ok_or_else(|| ApiFailure::InvalidResponse("No content in response".to_string()))?;

        let usage = response_json.get("usage");
        let input_tokens = usage
            .and_then(|u| u.get("prompt_tokens"))
            .and_then(|t| t.as_u64())
            .unwrap_or(0);
        let output_tokens = usage
            .and_then(|u| u.get("completion_tokens"))
            .and_then(|t| t.as_u64())
            .unwrap_or(0);

        let model_used = response_json
            .get("model")
            .and_then(|m| m.as_str())
            .unwrap_or(&generation.model)
            .to_string();

        Ok(ProviderResponse {
            provider,
            content: content.to_string(),
            usage: TokenUsage { input_tokens, output_tokens },
            model_used,
            response_time,
        })
    }

    /// Make Anthropic messages request (private helper)
    async fn make_anthropic_request(&self, prompt: &str) -> Result<ProviderResponse, ApiFailure> {
        let provider = ProviderId::Anthropic;
        let api_key = self.api_key(provider)?;
        let generation = self.config.generation_config(provider);
        let url = self.endpoint(provider, "v1/messages")?;

        let request_body = serde_json::json!({
            "model": generation.model,
            "max_tokens": generation.max_tokens,
            "temperature": generation.temperature,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        });

        let request_start = Instant::now();
        let response = self
            .client
            .post(url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request_body)
            .send()
            .await
            .map_err(network_failure)?;

        let response_json = read_success_json(provider, response).await?;
        let response_time = request_start.elapsed();

        let content = response_json
            .get("content")
            .and_then(|content| content.get(0))
            .and_then(|item| item.get("text"))
            .and_then(|text| text.as_str())
            .ok_or_else(|| ApiFailure::InvalidResponse("No content in response".to_string()))?;

        let usage = response_json.get("usage");
        let input_tokens = usage
            .and_then(|u| u.get("input_tokens"))
            .and_then(|t| t.as_u64())
            .unwrap_or(0);
        let output_tokens = usage
            .and_then(|u| u.get("output_tokens"))
            .and_then(|t| t.as_u64())
            .unwrap_or(0);

        let model_used = response_json
            .get("model")
            .and_then(|m| m.as_str())
            .unwrap_or(&generation.model)
            .to_string();

        Ok(ProviderResponse {
            provider,
            content: content.to_string(),
            usage: TokenUsage { input_tokens, output_tokens },
            model_used,
            response_time,
        })
    }
}

#[async_trait]
impl ProviderClient for RealProviderClient {
    async fn generate(
        &self,
        provider: ProviderId,
        prompt: &str,
    ) -> Result<ProviderResponse, ApiFailure> {
        process_debug!(
            ProcessId::current(),
            provider = %provider,
            prompt_chars = prompt.chars().count(),
            "Sending prompt to provider"
        );

        let result = match provider {
            ProviderId::OpenAI => self.make_openai_request(prompt).await,
            ProviderId::Anthropic => self.make_anthropic_request(prompt).await,
        };

        if let Err(failure) = &result {
            process_warn!(
                ProcessId::current(),
                provider = %provider,
                "Provider request failed: {}",
                failure
            );
        }
        result
    }

    fn is_configured(&self, provider: ProviderId) -> bool {
        self.config.api_key(provider).is_some()
    }
}

fn network_failure(e: reqwest::Error) -> ApiFailure {
    if e.is_timeout() {
        ApiFailure::NetworkError(format!("request timed out: {e}"))
    } else {
        ApiFailure::NetworkError(e.to_string())
    }
}

/// Check the status and parse the JSON body of a vendor response
async fn read_success_json(
    provider: ProviderId,
    response: reqwest::Response,
) -> Result<serde_json::Value, ApiFailure> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let detail = format!("{provider} returned {status}: {}", truncate(&body, 200));
        return Err(ApiFailure::from_status(status.as_u16(), detail));
    }

    response
        .json()
        .await
        .map_err(|e| ApiFailure::InvalidResponse(format!("Failed to parse response: {e}")))
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
