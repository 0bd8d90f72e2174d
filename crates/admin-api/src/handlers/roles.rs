use std::collections::HashSet;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use admin_core::domain::{Role, RoleMatrix};
use admin_core::DomainError;

use super::{ok, ApiResult};
use crate::dto::SavePermissionsRequest;
use crate::state::AppState;

fn parse_role(raw: &str) -> Result<Role, DomainError> {
    Role::from_str(raw).ok_or_else(|| DomainError::UnknownRole(raw.to_string()))
}

/// GET /api/v1/roles
pub async fn matrix(State(state): State<AppState>) -> ApiResult<RoleMatrix> {
    ok(state.permissions.load_matrix().await?)
}

/// GET /api/v1/roles/{role}/menus
pub async fn granted(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> ApiResult<HashSet<Uuid>> {
    let role = parse_role(&role)?;
    ok(state.permissions.granted_menu_ids(role).await?)
}

/// PUT /api/v1/roles/{role}/menus
pub async fn save(
    State(state): State<AppState>,
    Path(role): Path<String>,
    Json(request): Json<SavePermissionsRequest>,
) -> ApiResult<HashSet<Uuid>> {
    let role = parse_role(&role)?;
    let menu_ids: HashSet<Uuid> = request.menu_ids.into_iter().collect();
    state.permissions.save_permissions(role, &menu_ids).await?;
    ok(menu_ids)
}
