//! Gateway errors and their mapping onto domain errors

use reqwest::StatusCode;
use thiserror::Error;

use admin_core::error::DomainError;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Gateway returned {status}: {message}")]
    Status {
        status: StatusCode,
        code: Option<String>,
        message: String,
    },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Client configuration error: {0}")]
    Config(String),
}

impl GatewayError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            GatewayError::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Message to surface to the caller: the gateway's own text when it sent one
    pub fn message(&self) -> String {
        match self {
            GatewayError::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    fn is_unique_violation(&self) -> bool {
        matches!(self, GatewayError::Status { code: Some(code), .. } if code == "23505")
    }
}

impl From<GatewayError> for DomainError {
    fn from(err: GatewayError) -> Self {
        if err.is_unique_violation() {
            return DomainError::Conflict(err.message());
        }
        match err.status() {
            Some(StatusCode::NOT_FOUND) => DomainError::NotFound(err.message()),
            Some(StatusCode::CONFLICT) => DomainError::Conflict(err.message()),
            Some(StatusCode::UNAUTHORIZED) => DomainError::Unauthenticated,
            Some(StatusCode::TOO_MANY_REQUESTS) => DomainError::RateLimited,
            _ => DomainError::GatewayError(err.message()),
        }
    }
}
