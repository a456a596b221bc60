//! Relay-specific data types

use std::time::Duration;

use serde::{Deserialize, Serialize};
use shared::{Mode, ProviderId, TokenUsage};
use uuid::Uuid;

use crate::core::RoutingReason;

/// Provider response data
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub provider: ProviderId,
    pub content: String,
    pub usage: TokenUsage,
    pub model_used: String,
    pub response_time: Duration,
}

/// Reply to an agent-prompt chat request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentReply {
    pub request_id: Uuid,
    pub reply: String,
    pub provider: ProviderId,
    pub model: String,
    pub mode: Mode,
    pub modules: Vec<String>,
    pub usage: TokenUsage,
}

/// Reply to a dual-run chat request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DualReply {
    pub request_id: Uuid,
    pub reply: String,
    pub provider: ProviderId,
    pub model: String,
    pub reason: RoutingReason,
    pub usage: TokenUsage,
}

/// Routing and augmentation outcome for a message, without any vendor call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePreview {
    pub provider: ProviderId,
    pub reason: RoutingReason,
    pub agent_provider: ProviderId,
    pub mode: Mode,
    pub modules: Vec<String>,
    pub prompt: String,
}
