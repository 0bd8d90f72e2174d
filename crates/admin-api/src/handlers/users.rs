use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use admin_core::domain::{AuthUser, NewUser, UserSummary, UserUpdate};

use super::{ok, ApiResult};
use crate::dto::SearchQuery;
use crate::state::AppState;

/// GET /api/v1/users?search=
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Vec<UserSummary>> {
    ok(state.users.list(query.term()).await?)
}

/// POST /api/v1/users
pub async fn create(State(state): State<AppState>, Json(form): Json<NewUser>) -> ApiResult<AuthUser> {
    ok(state.users.create(form).await?)
}

/// PUT /api/v1/users/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<UserUpdate>,
) -> ApiResult<UserSummary> {
    ok(state.users.update(id, form).await?)
}

/// DELETE /api/v1/users/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<()> {
    state.users.delete(id).await?;
    ok(())
}
