// ============================================================================
// Admin API - Auth Handlers
// File: crates/admin-api/src/handlers/auth.rs
// ============================================================================
//! Sign-in, sign-up, refresh, sign-out and the current session

use axum::{extract::State, http::HeaderMap, Extension, Json};
use admin_core::domain::{AuthSession, SignInForm, SignUpForm, SignUpOutcome};
use admin_core::{DomainError, SessionContext};

use super::{ok, ApiResult};
use crate::dto::{RefreshRequest, SessionDto};
use crate::middleware::bearer_token;
use crate::state::AppState;

/// POST /api/v1/auth/sign-in
pub async fn sign_in(
    State(state): State<AppState>,
    Json(form): Json<SignInForm>,
) -> ApiResult<AuthSession> {
    state.sign_in_limiter.check(&form.email)?;
    ok(state.auth.sign_in(form).await?)
}

/// POST /api/v1/auth/sign-up
pub async fn sign_up(
    State(state): State<AppState>,
    Json(form): Json<SignUpForm>,
) -> ApiResult<SignUpOutcome> {
    ok(state.auth.sign_up(form).await?)
}

/// POST /api/v1/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> ApiResult<AuthSession> {
    ok(state.auth.refresh(&request.refresh_token).await?)
}

/// POST /api/v1/auth/sign-out
pub async fn sign_out(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<()> {
    let token = bearer_token(&headers).ok_or(DomainError::Unauthenticated)?;
    state.auth.sign_out(token).await?;
    ok(())
}

/// GET /api/v1/auth/session
pub async fn session(Extension(session): Extension<SessionContext>) -> ApiResult<SessionDto> {
    ok(SessionDto::from(&session))
}
