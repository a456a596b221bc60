//! Relay configuration loaded from the environment
//!
//! Environment variables:
//! - OPENAI_API_KEY / ANTHROPIC_API_KEY: vendor credentials (a provider without a key is
//!   still routable, but calls to it fail with `ApiFailure::MissingApiKey`)
//! - OPENAI_MODEL / ANTHROPIC_MODEL: model names
//! - OPENAI_BASE_URL / ANTHROPIC_BASE_URL: API roots, overridable for proxies and tests;
//!   a path prefix such as `https://gateway/openai` is kept
//! - RELAY_MAX_TOKENS, RELAY_TEMPERATURE, RELAY_TIMEOUT_MS: generation and transport limits
//! - AGENT_PROVIDER: provider used by the agent-prompt path (default: openai)

use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::{SharedError, SharedResult};
use crate::types::{GenerationConfig, ProviderId};

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-5-sonnet-latest";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Credentials, models and transport limits for both vendors
#[derive(Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub openai_model: String,
    pub anthropic_model: String,
    pub openai_base_url: Url,
    pub anthropic_base_url: Url,
    pub max_tokens: u32,
    pub temperature: f32,
    pub request_timeout_ms: u64,
    pub agent_provider: ProviderId,
}

impl RelayConfig {
    /// Load configuration from process environment variables
    pub fn from_env() -> SharedResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> SharedResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let defaults = Self::default();

        let openai_base_url = match get("OPENAI_BASE_URL") {
            Some(raw) => parse_url("OPENAI_BASE_URL", &raw)?,
            None => defaults.openai_base_url,
        };
        let anthropic_base_url = match get("ANTHROPIC_BASE_URL") {
            Some(raw) => parse_url("ANTHROPIC_BASE_URL", &raw)?,
            None => defaults.anthropic_base_url,
        };

        let max_tokens =
            parse_or("RELAY_MAX_TOKENS", get("RELAY_MAX_TOKENS"), defaults.max_tokens)?;
        let temperature =
            parse_or("RELAY_TEMPERATURE", get("RELAY_TEMPERATURE"), defaults.temperature)?;
        let request_timeout_ms =
            parse_or("RELAY_TIMEOUT_MS", get("RELAY_TIMEOUT_MS"), defaults.request_timeout_ms)?;

        let agent_provider = match get("AGENT_PROVIDER") {
            Some(raw) => raw.parse::<ProviderId>().map_err(|_| SharedError::InvalidConfig {
                field: "AGENT_PROVIDER".to_string(),
                value: raw,
            })?,
            None => defaults.agent_provider,
        };

        Ok(Self {
            openai_api_key: get(ProviderId::OpenAI.api_key_var()),
            anthropic_api_key: get(ProviderId::Anthropic.api_key_var()),
            openai_model: get("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            anthropic_model: get("ANTHROPIC_MODEL").unwrap_or(defaults.anthropic_model),
            openai_base_url,
            anthropic_base_url,
            max_tokens,
            temperature,
            request_timeout_ms,
            agent_provider,
        })
    }

    pub fn api_key(&self, provider: ProviderId) -> Option<&str> {
        match provider {
            ProviderId::OpenAI => self.openai_api_key.as_deref(),
            ProviderId::Anthropic => self.anthropic_api_key.as_deref(),
        }
    }

    pub fn base_url(&self, provider: ProviderId) -> &Url {
        match provider {
            ProviderId::OpenAI => &self.openai_base_url,
            ProviderId::Anthropic => &self.anthropic_base_url,
        }
    }

    /// Generation parameters to send to a provider
    pub fn generation_config(&self, provider: ProviderId) -> GenerationConfig {
        let model = match provider {
            ProviderId::OpenAI => self.openai_model.clone(),
            ProviderId::Anthropic => self.anthropic_model.clone(),
        };
        GenerationConfig {
            model,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }

    /// Providers that have credentials configured
    pub fn configured_providers(&self) -> Vec<ProviderId> {
        ProviderId::ALL
            .into_iter()
            .filter(|provider| self.api_key(*provider).is_some())
            .collect()
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            anthropic_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            anthropic_model: DEFAULT_ANTHROPIC_MODEL.to_string(),
            openai_base_url: Url::parse(DEFAULT_OPENAI_BASE_URL).expect("static URL is valid"),
            anthropic_base_url: Url::parse(DEFAULT_ANTHROPIC_BASE_URL)
                .expect("static URL is valid"),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
            agent_provider: ProviderId::OpenAI,
        }
    }
}

// Keys stay out of Debug output
impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "***"))
            .field("anthropic_api_key", &self.anthropic_api_key.as_ref().map(|_| "***"))
            .field("openai_model", &self.openai_model)
            .field("anthropic_model", &self.anthropic_model)
            .field("openai_base_url", &self.openai_base_url.as_str())
            .field("anthropic_base_url", &self.anthropic_base_url.as_str())
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .field("agent_provider", &self.agent_provider)
            .finish()
    }
}

fn parse_url(field: &str, raw: &str) -> SharedResult<Url> {
    Url::parse(raw).map_err(|source| SharedError::InvalidUrl {
        field: field.to_string(),
        source,
    })
}

fn parse_or<T: std::str::FromStr>(field: &str, raw: Option<String>, default: T) -> SharedResult<T> {
    match raw {
        Some(value) => value.parse::<T>().map_err(|_| SharedError::InvalidConfig {
            field: field.to_string(),
            value,
        }),
        None => Ok(default),
    }
}
