//! WebServer-specific error types

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use relay::RelayError;
use serde_json::json;
use shared::{ApiFailure, SharedError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebServerError {
    #[error("Server startup error: {0}")]
    ServerStartup(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request body: {0}")]
    InvalidRequest(#[from] JsonRejection),

    #[error(transparent)]
    Relay(#[from] RelayError),

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl WebServerError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// HTTP status reported to the caller
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(rejection) => rejection.status(),
            Self::Relay(RelayError::EmptyMessage) => StatusCode::BAD_REQUEST,
            Self::Relay(RelayError::ProviderError { reason, .. }) => match reason {
                ApiFailure::MissingApiKey(_) | ApiFailure::ServiceUnavailable => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                ApiFailure::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
                ApiFailure::AuthenticationFailed
                | ApiFailure::ServerError(_)
                | ApiFailure::NetworkError(_)
                | ApiFailure::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
            },
            Self::Relay(_)
            | Self::ServerStartup(_)
            | Self::Config(_)
            | Self::SharedError(_)
            | Self::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({
            "status": "error",
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

pub type WebServerResult<T> = Result<T, WebServerError>;
