//! Relay error types

use shared::{ApiFailure, ProviderId, SharedError};
use thiserror::Error;

/// Result type for relay operations
pub type RelayResult<T> = Result<T, RelayError>;

/// Relay error types
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Provider request failed: {provider} - {reason}")]
    ProviderError { provider: ProviderId, reason: ApiFailure },

    #[error("Message must not be empty")]
    EmptyMessage,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Shared component error: {0}")]
    Shared(#[from] SharedError),
}
