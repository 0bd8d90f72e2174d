use axum::{extract::State, Extension};

use admin_core::domain::MenuNode;
use admin_core::SessionContext;

use super::{ok, ApiResult};
use crate::state::AppState;

/// GET /api/v1/navigation
pub async fn navigation(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> ApiResult<Vec<MenuNode>> {
    ok(state.access.resolve(Some(session.effective_role())).await)
}
