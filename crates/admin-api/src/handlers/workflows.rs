use axum::{
    extract::{Multipart, Path, Query, State},
    Extension,
};
use uuid::Uuid;

use admin_core::domain::Workflow;
use admin_core::SessionContext;

use super::{ok, ApiResult};
use crate::dto::{MultipartForm, SearchQuery, WorkflowDto};
use crate::state::AppState;

const MEDIA_FIELD: &str = "media";

fn with_media(state: &AppState, workflow: Workflow) -> WorkflowDto {
    let media_url = state.workflows.media_url(&workflow);
    WorkflowDto { workflow, media_url }
}

/// GET /api/v1/workflows?search=
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Vec<WorkflowDto>> {
    let workflows = state.workflows.list(query.term()).await?;
    ok(workflows.into_iter().map(|w| with_media(&state, w)).collect())
}

/// GET /api/v1/workflows/{id}
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<WorkflowDto> {
    let workflow = state.workflows.get(id).await?;
    ok(with_media(&state, workflow))
}

/// POST /api/v1/workflows (multipart: title, description, markdown_content, is_public, media)
pub async fn create(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    multipart: Multipart,
) -> ApiResult<WorkflowDto> {
    let mut form = MultipartForm::read(multipart, MEDIA_FIELD).await?;
    let media = form.take_file();
    let created_by = session.user.as_ref().map(|u| u.id);

    let workflow = state
        .workflows
        .create(form.workflow_form(), media, created_by)
        .await?;
    ok(with_media(&state, workflow))
}

/// PUT /api/v1/workflows/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> ApiResult<WorkflowDto> {
    let mut form = MultipartForm::read(multipart, MEDIA_FIELD).await?;
    let media = form.take_file();
    let workflow = state.workflows.update(id, form.workflow_form(), media).await?;
    ok(with_media(&state, workflow))
}

/// DELETE /api/v1/workflows/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<()> {
    state.workflows.delete(id).await?;
    ok(())
}
