//! Workflow administration and the public catalogue

use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    MediaKind, NewWorkflow, PreparedUpload, PublicWorkflow, UploadFile, Workflow, WorkflowForm,
    WorkflowPatch,
};
use crate::error::DomainError;
use crate::repositories::{ObjectStorage, WorkflowRepository};
use crate::saga::{RetryPolicy, Saga};

/// Validated media ready for upload
struct MediaUpload {
    kind: MediaKind,
    size: u64,
    prepared: PreparedUpload,
}

impl MediaUpload {
    fn from_file(file: &UploadFile) -> Result<Self, DomainError> {
        let kind = MediaKind::detect(&file.file_name, file.content_type.as_deref())?;
        Ok(Self {
            kind,
            size: file.size(),
            prepared: file.prepare(kind.policy())?,
        })
    }
}

pub struct WorkflowService {
    workflows: Arc<dyn WorkflowRepository>,
    storage: Arc<dyn ObjectStorage>,
    bucket: String,
    retry: RetryPolicy,
}

impl WorkflowService {
    pub fn new(
        workflows: Arc<dyn WorkflowRepository>,
        storage: Arc<dyn ObjectStorage>,
        bucket: impl Into<String>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            workflows,
            storage,
            bucket: bucket.into(),
            retry,
        }
    }

    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Workflow>, DomainError> {
        let workflows = self.workflows.list_all().await?;
        Ok(match search {
            Some(term) => workflows.into_iter().filter(|w| w.matches(term)).collect(),
            None => workflows,
        })
    }

    /// Public workflows with media URLs. Fetch failures yield an empty catalogue.
    pub async fn list_public(&self, search: Option<&str>) -> Vec<PublicWorkflow> {
        let workflows = match self.workflows.list_public().await {
            Ok(workflows) => workflows,
            Err(e) => {
                error!("Failed to load public workflows: {}", e);
                return Vec::new();
            }
        };

        workflows
            .into_iter()
            .filter(|w| w.is_public && search.map_or(true, |term| w.matches(term)))
            .map(|w| {
                let media_url = self.media_url(&w);
                PublicWorkflow::project(w, media_url)
            })
            .collect()
    }

    pub async fn get(&self, id: Uuid) -> Result<Workflow, DomainError> {
        self.workflows
            .find_by_id(&id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("workflow {}", id)))
    }

    /// Permanent public URL of the workflow's media, if it has any
    pub fn media_url(&self, workflow: &Workflow) -> Option<String> {
        workflow
            .video_path
            .as_deref()
            .map(|path| self.storage.public_url(&self.bucket, path))
    }

    async fn upload(&self, saga: &mut Saga, media: &MediaUpload) -> Result<(), DomainError> {
        let prepared = &media.prepared;
        self.storage
            .upload(&self.bucket, &prepared.path, prepared.bytes.clone(), &prepared.content_type)
            .await?;

        let storage = self.storage.clone();
        let bucket = self.bucket.clone();
        let paths = vec![prepared.path.clone()];
        saga.on_rollback(format!("remove {}", prepared.path), move || {
            let storage = storage.clone();
            let bucket = bucket.clone();
            let paths = paths.clone();
            async move { storage.remove(&bucket, &paths).await }
        });
        Ok(())
    }

    async fn discard(&self, path: &str) {
        if let Err(e) = self.storage.remove(&self.bucket, &[path.to_string()]).await {
            warn!("Failed to remove workflow media {}: {}", path, e);
        }
    }

    pub async fn create(
        &self,
        form: WorkflowForm,
        media: Option<UploadFile>,
        created_by: Option<Uuid>,
    ) -> Result<Workflow, DomainError> {
        let form = form.normalized()?;
        let media = media.as_ref().map(MediaUpload::from_file).transpose()?;

        let mut saga = Saga::new("workflows.create", self.retry);
        if let Some(media) = &media {
            self.upload(&mut saga, media).await?;
        }

        let row = NewWorkflow {
            title: form.title,
            description: form.description,
            markdown_content: form.markdown_content,
            media_type: media.as_ref().map(|m| m.kind),
            video_path: media.as_ref().map(|m| m.prepared.path.clone()),
            video_size: media.as_ref().map(|m| m.size),
            is_public: form.is_public,
            created_by,
        };

        match self.workflows.create(&row).await {
            Ok(workflow) => {
                saga.commit();
                info!("Workflow created: {} ({})", workflow.title, workflow.id);
                Ok(workflow)
            }
            Err(e) => saga.abort(e).await,
        }
    }

    /// Patch the workflow. New media is uploaded first and the previous
    /// object removed only after the row points at the new one.
    pub async fn update(
        &self,
        id: Uuid,
        form: WorkflowForm,
        media: Option<UploadFile>,
    ) -> Result<Workflow, DomainError> {
        let form = form.normalized()?;
        let media = media.as_ref().map(MediaUpload::from_file).transpose()?;
        let existing = self.get(id).await?;

        let mut patch = WorkflowPatch::metadata(form);
        let mut saga = Saga::new("workflows.update", self.retry);
        if let Some(media) = &media {
            self.upload(&mut saga, media).await?;
            patch.media_type = Some(media.kind);
            patch.video_path = Some(media.prepared.path.clone());
            patch.video_size = Some(media.size);
        }

        let workflow = match self.workflows.update(&id, &patch).await {
            Ok(workflow) => workflow,
            Err(e) => return saga.abort(e).await,
        };
        saga.commit();

        if media.is_some() {
            if let Some(old) = existing.video_path.as_deref() {
                self.discard(old).await;
            }
        }
        info!("Workflow updated: {} ({})", workflow.title, workflow.id);
        Ok(workflow)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let existing = self.get(id).await?;
        if let Some(path) = existing.video_path.as_deref() {
            self.discard(path).await;
        }
        self.workflows.delete(&id).await?;
        info!("Workflow deleted: {}", id);
        Ok(())
    }
}
