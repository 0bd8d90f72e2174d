use axum::extract::{Query, State};

use admin_core::domain::PublicWorkflow;

use super::{ok, ApiResult};
use crate::dto::SearchQuery;
use crate::state::AppState;

/// GET /api/v1/public/workflows?search= (no sign-in)
pub async fn workflows(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Vec<PublicWorkflow>> {
    ok(state.workflows.list_public(query.term()).await)
}
