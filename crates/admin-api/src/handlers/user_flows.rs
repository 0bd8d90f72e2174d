use axum::extract::{Query, State};

use admin_core::domain::UserFlow;
use admin_shared::types::Page;

use super::{ok, ApiResult};
use crate::dto::UserFlowSearch;
use crate::state::AppState;

/// GET /api/v1/user-flows?flow_id=&flow_name=&page=
pub async fn search(
    State(state): State<AppState>,
    Query(search): Query<UserFlowSearch>,
) -> ApiResult<Page<UserFlow>> {
    ok(state.user_flows.search(search.into()).await?)
}
