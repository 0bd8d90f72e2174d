// ============================================================================
// Admin Infrastructure - REST Workflow Repository
// File: crates/admin-infrastructure/src/rest/workflow_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use admin_core::domain::{MediaKind, NewWorkflow, Workflow, WorkflowPatch};
use admin_core::error::DomainError;
use admin_core::repositories::WorkflowRepository;
use admin_shared::constants::TABLE_WORKFLOWS;

use crate::gateway::{GatewayClient, TableQuery};

pub struct RestWorkflowRepository {
    client: GatewayClient,
}

impl RestWorkflowRepository {
    pub fn new(client: GatewayClient) -> Self {
        Self { client }
    }

    async fn select(&self, query: TableQuery) -> Result<Vec<Workflow>, DomainError> {
        let rows: Vec<WorkflowRow> = self
            .client
            .table(TABLE_WORKFLOWS)
            .select(&query.order("created_at", false))
            .await?;
        Ok(rows.into_iter().map(Workflow::from).collect())
    }
}

#[async_trait]
impl WorkflowRepository for RestWorkflowRepository {
    async fn list_all(&self) -> Result<Vec<Workflow>, DomainError> {
        self.select(TableQuery::all()).await
    }

    async fn list_public(&self) -> Result<Vec<Workflow>, DomainError> {
        self.select(TableQuery::all().eq("is_public", true)).await
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Workflow>, DomainError> {
        let row: Option<WorkflowRow> = self
            .client
            .table(TABLE_WORKFLOWS)
            .select_one(&TableQuery::all().eq("id", id))
            .await?;
        Ok(row.map(Workflow::from))
    }

    async fn create(&self, workflow: &NewWorkflow) -> Result<Workflow, DomainError> {
        info!("Recording workflow: {}", workflow.title);
        let row: WorkflowRow = self.client.table(TABLE_WORKFLOWS).insert_one(workflow).await?;
        Ok(row.into())
    }

    async fn update(&self, id: &Uuid, patch: &WorkflowPatch) -> Result<Workflow, DomainError> {
        let rows: Vec<WorkflowRow> = self
            .client
            .table(TABLE_WORKFLOWS)
            .update(&TableQuery::default().eq("id", id), patch)
            .await?;
        rows.into_iter()
            .next()
            .map(Workflow::from)
            .ok_or_else(|| DomainError::NotFound(format!("workflow {}", id)))
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        self.client
            .table(TABLE_WORKFLOWS)
            .delete(&TableQuery::default().eq("id", id))
            .await?;
        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self
            .client
            .table(TABLE_WORKFLOWS)
            .count(&TableQuery::default().select("id"))
            .await?)
    }
}

#[derive(Debug, Deserialize)]
struct WorkflowRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    markdown_content: Option<String>,
    media_type: Option<String>,
    video_path: Option<String>,
    video_size: Option<i64>,
    is_public: Option<bool>,
    created_by: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<WorkflowRow> for Workflow {
    fn from(row: WorkflowRow) -> Self {
        // Rows written before images were supported carry only a video path
        let media_type = row
            .media_type
            .as_deref()
            .and_then(MediaKind::from_str)
            .or_else(|| row.video_path.as_ref().map(|_| MediaKind::Video));

        Workflow {
            id: row.id,
            title: row.title,
            description: row.description,
            markdown_content: row.markdown_content,
            media_type,
            video_path: row.video_path,
            video_size: row.video_size.map(|s| s.max(0) as u64),
            is_public: row.is_public.unwrap_or(false),
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at.unwrap_or(row.created_at),
        }
    }
}
