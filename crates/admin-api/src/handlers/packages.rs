// ============================================================================
// Admin API - Package Handlers
// File: crates/admin-api/src/handlers/packages.rs
// ============================================================================
//! Installer packages: multipart upload, listing and signed downloads

use axum::{
    extract::{Multipart, Path, Query, State},
    Extension,
};
use uuid::Uuid;

use admin_core::domain::{Package, PackageDownload};
use admin_core::{DomainError, SessionContext};

use super::{ok, ApiResult};
use crate::dto::{MultipartForm, SearchQuery};
use crate::state::AppState;

/// GET /api/v1/packages?search=
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Vec<Package>> {
    ok(state.packages.list(query.term()).await?)
}

/// POST /api/v1/packages (multipart: name, version, description, file)
pub async fn create(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    multipart: Multipart,
) -> ApiResult<Package> {
    let mut form = MultipartForm::read(multipart, "file").await?;
    let file = form
        .take_file()
        .ok_or_else(|| DomainError::ValidationError("Package file is required".to_string()))?;
    let uploaded_by = session.user.as_ref().map(|u| u.id);

    ok(state
        .packages
        .create(form.package_form(), file, uploaded_by)
        .await?)
}

/// PUT /api/v1/packages/{id} (multipart, file optional)
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> ApiResult<Package> {
    let mut form = MultipartForm::read(multipart, "file").await?;
    let file = form.take_file();
    ok(state.packages.update(id, form.package_form(), file).await?)
}

/// DELETE /api/v1/packages/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<()> {
    state.packages.delete(id).await?;
    ok(())
}

/// GET /api/v1/packages/{id}/download
pub async fn download(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<PackageDownload> {
    ok(state.packages.download(id).await?)
}
