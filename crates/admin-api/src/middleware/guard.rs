use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use admin_core::{Role, RouteDecision, RouteGuard, SessionContext};

use crate::error::ApiError;

/// Route layer gating a group of routes on sign-in and, optionally, a role.
///
/// Use with `from_fn_with_state(Some(Role::Admin), require_role)`.
pub async fn require_role(
    State(required): State<Option<Role>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session = request
        .extensions()
        .get::<SessionContext>()
        .cloned()
        .unwrap_or_default();

    match RouteGuard::evaluate(&session, required) {
        RouteDecision::Allow => Ok(next.run(request).await),
        denied => {
            warn!(
                path = %request.uri().path(),
                required = ?required,
                "Request denied: {:?}",
                denied
            );
            Err(ApiError::Denied(denied))
        }
    }
}
