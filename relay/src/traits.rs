//! Relay trait definitions for dependency injection

use async_trait::async_trait;

use shared::{ApiFailure, ProviderId};

use crate::types::ProviderResponse;

/// Text-generation collaborator: sends a finished prompt to one vendor
#[mockall::automock]
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Make request to the given provider and return the generated text
    async fn generate(
        &self,
        provider: ProviderId,
        prompt: &str,
    ) -> Result<ProviderResponse, ApiFailure>;

    /// Whether credentials are configured for the provider
    fn is_configured(&self, provider: ProviderId) -> bool;
}
