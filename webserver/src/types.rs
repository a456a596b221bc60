//! WebServer request and response bodies

use serde::{Deserialize, Serialize};
use shared::{ChatMeta, ProviderId};

/// Body of `POST /api/dual`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DualRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ChatMeta>,
}

/// Per-vendor entry in the status payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderStatus {
    pub provider: ProviderId,
    pub configured: bool,
}
