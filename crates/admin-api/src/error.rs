use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use admin_core::{DomainError, RouteDecision};
use admin_shared::constants::LOGIN_PATH;

use crate::response::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Access denied: {0:?}")]
    Denied(RouteDecision),
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::BadRequest(format!("Invalid multipart body: {}", err.body_text()))
    }
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, Option<&'static str>) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", None),
            ApiError::Denied(decision) => {
                let status = match decision {
                    RouteDecision::RedirectToLogin => StatusCode::UNAUTHORIZED,
                    _ => StatusCode::FORBIDDEN,
                };
                (status, "ACCESS_DENIED", decision.redirect_target())
            }
            ApiError::Domain(err) => match err {
                DomainError::ValidationError(_) | DomainError::UnknownRole(_) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", None)
                }
                DomainError::FileRejected(_) => (StatusCode::BAD_REQUEST, "FILE_REJECTED", None),
                DomainError::NotFound(_) | DomainError::MenuNotFound(_) => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", None)
                }
                DomainError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT", None),
                DomainError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS", None)
                }
                DomainError::SessionExpired => {
                    (StatusCode::UNAUTHORIZED, "SESSION_EXPIRED", Some(LOGIN_PATH))
                }
                DomainError::Unauthenticated => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED", Some(LOGIN_PATH))
                }
                DomainError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED", None),
                DomainError::GatewayError(_) => (StatusCode::BAD_GATEWAY, "GATEWAY_ERROR", None),
                DomainError::StorageError(_) => (StatusCode::BAD_GATEWAY, "STORAGE_ERROR", None),
                DomainError::InternalError(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", None)
                }
            },
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::Denied(RouteDecision::RedirectToLogin) => "Sign in required".to_string(),
            ApiError::Denied(_) => "Insufficient role".to_string(),
            ApiError::Domain(DomainError::ValidationError(msg))
            | ApiError::Domain(DomainError::FileRejected(msg))
            | ApiError::Domain(DomainError::NotFound(msg))
            | ApiError::Domain(DomainError::Conflict(msg))
            | ApiError::Domain(DomainError::GatewayError(msg))
            | ApiError::Domain(DomainError::StorageError(msg)) => msg.clone(),
            ApiError::Domain(err) => err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, redirect) = self.parts();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!("{}: {}", code, message);
        } else {
            tracing::warn!("{}: {}", code, message);
        }

        let body = Json(ApiResponse::<()>::error(code, &message, redirect));
        (status, body).into_response()
    }
}
