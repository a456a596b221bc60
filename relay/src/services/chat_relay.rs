//! Chat relay: wires the routing and prompt logic to a provider client

use std::sync::Arc;

use shared::{ChatMeta, ChatRequest, ProcessId, ProviderId, process_info};
use uuid::Uuid;

use crate::core::{BASE_PROMPT, PromptAugmenter, compose_with_history, route};
use crate::error::{RelayError, RelayResult};
use crate::traits::ProviderClient;
use crate::types::{AgentReply, DualReply, ProviderResponse, RoutePreview};

/// Handles both request paths for a shared provider client
pub struct ChatRelay<P: ProviderClient> {
    client: Arc<P>,
    agent_provider: ProviderId,
    augmenter: PromptAugmenter<'static>,
    base_prompt: String,
}

impl<P: ProviderClient> ChatRelay<P> {
    /// Create new relay sending agent prompts to `agent_provider`
    pub fn new(client: Arc<P>, agent_provider: ProviderId) -> Self {
        Self {
            client,
            agent_provider,
            augmenter: PromptAugmenter::new(),
            base_prompt: BASE_PROMPT.to_string(),
        }
    }

    /// Replace the base system prompt
    pub fn with_base_prompt(mut self, base_prompt: impl Into<String>) -> Self {
        self.base_prompt = base_prompt.into();
        self
    }

    pub fn client(&self) -> &Arc<P> {
        &self.client
    }

    pub fn agent_provider(&self) -> ProviderId {
        self.agent_provider
    }

    /// Agent-prompt path: augment the base prompt, append history and the
    /// message, and send the result to the agent provider
    pub async fn agent_chat(&self, request: &ChatRequest) -> RelayResult<AgentReply> {
        ensure_message(&request.message)?;

        let modules: Vec<String> = self
            .augmenter
            .active_modules(&request.message)
            .iter()
            .map(|module| module.key.to_string())
            .collect();
        let system = self
            .augmenter
            .build_prompt(&self.base_prompt, &request.message, request.mode);
        let prompt = compose_with_history(&system, &request.history, &request.message);

        let request_id = Uuid::new_v4();
        process_info!(
            ProcessId::current(),
            request_id = %request_id,
            mode = %request.mode,
            provider = %self.agent_provider,
            modules = ?modules,
            "Relaying agent chat"
        );

        let response = self.send(self.agent_provider, &prompt).await?;

        Ok(AgentReply {
            request_id,
            reply: response.content,
            provider: response.provider,
            model: response.model_used,
            mode: request.mode,
            modules,
            usage: response.usage,
        })
    }

    /// Dual-run path: route on message and metadata, forward the raw message
    pub async fn dual_chat(
        &self,
        message: &str,
        meta: Option<&ChatMeta>,
    ) -> RelayResult<DualReply> {
        ensure_message(message)?;

        let decision = route(message, meta);
        let request_id = Uuid::new_v4();
        process_info!(
            ProcessId::current(),
            request_id = %request_id,
            provider = %decision.provider,
            reason = %decision.reason,
            "Relaying dual chat"
        );

        let response = self.send(decision.provider, message).await?;

        Ok(DualReply {
            request_id,
            reply: response.content,
            provider: response.provider,
            model: response.model_used,
            reason: decision.reason,
            usage: response.usage,
        })
    }

    /// Routing decision and augmented prompt for a request, without a vendor call
    pub fn preview(&self, request: &ChatRequest) -> RoutePreview {
        let decision = route(&request.message, request.meta.as_ref());
        let system = self
            .augmenter
            .build_prompt(&self.base_prompt, &request.message, request.mode);

        RoutePreview {
            provider: decision.provider,
            reason: decision.reason,
            agent_provider: self.agent_provider,
            mode: request.mode,
            modules: self
                .augmenter
                .active_modules(&request.message)
                .iter()
                .map(|module| module.key.to_string())
                .collect(),
            prompt: compose_with_history(&system, &request.history, &request.message),
        }
    }

    async fn send(&self, provider: ProviderId, prompt: &str) -> RelayResult<ProviderResponse> {
        self.client
            .generate(provider, prompt)
            .await
            .map_err(|reason| RelayError::ProviderError { provider, reason })
    }
}

fn ensure_message(message: &str) -> RelayResult<()> {
    if message.trim().is_empty() {
        return Err(RelayError::EmptyMessage);
    }
    Ok(())
}
