use axum::{extract::State, Extension};

use admin_core::services::DashboardSummary;
use admin_core::SessionContext;

use super::{ok, ApiResult};
use crate::state::AppState;

/// GET /api/v1/dashboard
pub async fn summary(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> ApiResult<DashboardSummary> {
    ok(state.dashboard.summary(&session).await)
}
