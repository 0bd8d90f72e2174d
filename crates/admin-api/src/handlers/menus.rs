// ============================================================================
// Admin API - Menu Handlers
// File: crates/admin-api/src/handlers/menus.rs
// ============================================================================

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use admin_core::domain::{Menu, MenuDraft, MenuIcon};

use super::{ok, ApiResult};
use crate::dto::ParentQuery;
use crate::state::AppState;

/// GET /api/v1/menus
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Menu>> {
    ok(state.menus.list().await?)
}

/// POST /api/v1/menus
pub async fn create(State(state): State<AppState>, Json(draft): Json<MenuDraft>) -> ApiResult<Menu> {
    ok(state.menus.create(draft).await?)
}

/// PUT /api/v1/menus/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(draft): Json<MenuDraft>,
) -> ApiResult<Menu> {
    ok(state.menus.update(id, draft).await?)
}

/// DELETE /api/v1/menus/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<()> {
    state.menus.delete(id).await?;
    ok(())
}

/// GET /api/v1/menus/parents?exclude=
pub async fn parents(
    State(state): State<AppState>,
    Query(query): Query<ParentQuery>,
) -> ApiResult<Vec<Menu>> {
    ok(state.menus.parent_candidates(query.exclude).await?)
}

/// GET /api/v1/menus/icons
pub async fn icons() -> ApiResult<Vec<&'static str>> {
    ok(MenuIcon::options())
}
