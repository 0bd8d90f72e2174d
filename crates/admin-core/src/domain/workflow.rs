// ============================================================================
// Admin Core - Workflow Entity
// File: crates/admin-core/src/domain/workflow.rs
// Description: Markdown document with an optional video or image
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use admin_shared::utils::{contains_ignore_case, non_blank};

use super::upload::MediaKind;

/// Workflow entity. `video_path` holds the media object path for either kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Workflow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub markdown_content: Option<String>,
    pub media_type: Option<MediaKind>,
    pub video_path: Option<String>,
    pub video_size: Option<u64>,
    pub is_public: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Workflow {
    pub fn matches(&self, term: &str) -> bool {
        contains_ignore_case(&self.title, term)
            || self
                .description
                .as_deref()
                .is_some_and(|d| contains_ignore_case(d, term))
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WorkflowForm {
    #[validate(length(min = 1, max = 200, message = "Workflow title is required"))]
    pub title: String,

    pub description: Option<String>,

    pub markdown_content: Option<String>,

    #[serde(default)]
    pub is_public: bool,
}

impl WorkflowForm {
    pub fn normalized(self) -> Result<Self, validator::ValidationErrors> {
        let form = Self {
            title: self.title.trim().to_string(),
            description: non_blank(self.description),
            markdown_content: self.markdown_content.filter(|m| !m.trim().is_empty()),
            is_public: self.is_public,
        };
        form.validate()?;
        Ok(form)
    }
}

/// Row inserted into `workflows`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewWorkflow {
    pub title: String,
    pub description: Option<String>,
    pub markdown_content: Option<String>,
    pub media_type: Option<MediaKind>,
    pub video_path: Option<String>,
    pub video_size: Option<u64>,
    pub is_public: bool,
    pub created_by: Option<Uuid>,
}

/// Columns patched on `workflows`; media columns only when the media is replaced
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WorkflowPatch {
    pub title: String,
    pub description: Option<String>,
    pub markdown_content: Option<String>,
    pub is_public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_size: Option<u64>,
}

impl WorkflowPatch {
    pub fn metadata(form: WorkflowForm) -> Self {
        Self {
            title: form.title,
            description: form.description,
            markdown_content: form.markdown_content,
            is_public: form.is_public,
            media_type: None,
            video_path: None,
            video_size: None,
        }
    }
}

/// Workflow as shown in the anonymous catalogue
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PublicWorkflow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub markdown_content: Option<String>,
    pub media_type: Option<MediaKind>,
    pub video_size: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub media_url: Option<String>,
}

impl PublicWorkflow {
    pub fn project(workflow: Workflow, media_url: Option<String>) -> Self {
        Self {
            id: workflow.id,
            title: workflow.title,
            description: workflow.description,
            markdown_content: workflow.markdown_content,
            media_type: workflow.media_type,
            video_size: workflow.video_size,
            created_at: workflow.created_at,
            media_url,
        }
    }
}
