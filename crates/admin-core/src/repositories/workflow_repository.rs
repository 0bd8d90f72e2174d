//! Workflow repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewWorkflow, Workflow, WorkflowPatch};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkflowRepository: Send + Sync {
    /// All workflows, newest first
    async fn list_all(&self) -> Result<Vec<Workflow>, DomainError>;
    /// Workflows with `is_public = true`, newest first
    async fn list_public(&self) -> Result<Vec<Workflow>, DomainError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Workflow>, DomainError>;
    async fn create(&self, workflow: &NewWorkflow) -> Result<Workflow, DomainError>;
    async fn update(&self, id: &Uuid, patch: &WorkflowPatch) -> Result<Workflow, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
    async fn count(&self) -> Result<u64, DomainError>;
}
