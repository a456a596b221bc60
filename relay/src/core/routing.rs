//! Dual-provider routing
//!
//! Picks one of the two upstream vendors from the message and its optional
//! metadata. Rules are evaluated in order and the first match wins:
//!
//! 1. `priority == reasoning` escalates to the reasoning provider
//! 2. `emotion == frustrated` escalates to the reasoning provider
//! 3. messages longer than [`LONG_MESSAGE_THRESHOLD`] characters escalate
//! 4. everything else goes to the default provider

use serde::{Deserialize, Serialize};
use shared::{ChatMeta, Emotion, Priority, ProviderId};

/// Messages above this many characters go to the reasoning provider
pub const LONG_MESSAGE_THRESHOLD: usize = 1200;

/// Cost-efficient provider used unless a rule escalates
pub const DEFAULT_PROVIDER: ProviderId = ProviderId::OpenAI;

/// Higher-reasoning provider
pub const REASONING_PROVIDER: ProviderId = ProviderId::Anthropic;

/// Which rule produced a routing decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingReason {
    ReasoningPriority,
    FrustratedUser,
    LongMessage,
    Default,
}

impl std::fmt::Display for RoutingReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoutingReason::ReasoningPriority => write!(f, "reasoning priority"),
            RoutingReason::FrustratedUser => write!(f, "frustrated user"),
            RoutingReason::LongMessage => write!(f, "long message"),
            RoutingReason::Default => write!(f, "default"),
        }
    }
}

/// Provider chosen for one request, with the rule that chose it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub provider: ProviderId,
    pub reason: RoutingReason,
}

/// Route a message, reporting which rule matched
pub fn route(message: &str, meta: Option<&ChatMeta>) -> RoutingDecision {
    let priority = meta.and_then(|m| m.priority);
    let emotion = meta.and_then(|m| m.emotion);

    let (provider, reason) = if priority == Some(Priority::Reasoning) {
        (REASONING_PROVIDER, RoutingReason::ReasoningPriority)
    } else if emotion == Some(Emotion::Frustrated) {
        (REASONING_PROVIDER, RoutingReason::FrustratedUser)
    } else if message.chars().count() > LONG_MESSAGE_THRESHOLD {
        (REASONING_PROVIDER, RoutingReason::LongMessage)
    } else {
        (DEFAULT_PROVIDER, RoutingReason::Default)
    };

    RoutingDecision { provider, reason }
}

/// Select provider for a message (pure function)
pub fn select_provider(message: &str, meta: Option<&ChatMeta>) -> ProviderId {
    route(message, meta).provider
}
