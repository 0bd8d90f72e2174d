//! Request and response shapes that are not domain types

use std::collections::HashMap;

use axum::extract::Multipart;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use admin_core::domain::{
    AuthUser, PackageForm, Profile, Role, UploadFile, UserFlowQuery, Workflow, WorkflowForm,
};
use admin_core::SessionContext;

use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

impl SearchQuery {
    /// Search term, `None` when blank
    pub fn term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ParentQuery {
    pub exclude: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserFlowSearch {
    pub flow_id: Option<String>,
    pub flow_name: Option<String>,
    pub page: Option<u64>,
}

impl From<UserFlowSearch> for UserFlowQuery {
    fn from(search: UserFlowSearch) -> Self {
        UserFlowQuery::new(search.flow_id, search.flow_name, search.page.unwrap_or(1))
    }
}

#[derive(Debug, Deserialize)]
pub struct SavePermissionsRequest {
    pub menu_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Current session as seen by the client
#[derive(Debug, Serialize)]
pub struct SessionDto {
    pub authenticated: bool,
    pub user: Option<AuthUser>,
    pub role: Role,
    pub profile: Option<Profile>,
    pub display_name: Option<String>,
}

impl From<&SessionContext> for SessionDto {
    fn from(session: &SessionContext) -> Self {
        Self {
            authenticated: session.is_authenticated(),
            user: session.user.clone(),
            role: session.effective_role(),
            profile: session.profile.clone(),
            display_name: session.display_name().map(String::from),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WorkflowDto {
    #[serde(flatten)]
    pub workflow: Workflow,
    pub media_url: Option<String>,
}

/// Text fields and at most one file from a multipart form
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    file: Option<UploadFile>,
}

impl MultipartForm {
    /// Read every part; the part named `file_field` becomes the upload.
    /// An empty file part (no file chosen in the form) counts as absent.
    pub async fn read(mut multipart: Multipart, file_field: &str) -> Result<Self, ApiError> {
        let mut form = MultipartForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            if name == file_field {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(String::from);
                let bytes = field.bytes().await?;
                if !file_name.is_empty() && !bytes.is_empty() {
                    form.file = Some(UploadFile::new(file_name, content_type, bytes));
                }
            } else {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }
        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    fn required(&self, name: &str) -> String {
        self.text(name).unwrap_or_default()
    }

    fn flag(&self, name: &str) -> bool {
        matches!(
            self.fields.get(name).map(|v| v.trim().to_lowercase()).as_deref(),
            Some("true" | "on" | "1" | "yes")
        )
    }

    pub fn take_file(&mut self) -> Option<UploadFile> {
        self.file.take()
    }

    pub fn package_form(&self) -> PackageForm {
        PackageForm {
            name: self.required("name"),
            version: self.required("version"),
            description: self.text("description"),
        }
    }

    pub fn workflow_form(&self) -> WorkflowForm {
        WorkflowForm {
            title: self.required("title"),
            description: self.text("description"),
            markdown_content: self.text("markdown_content"),
            is_public: self.flag("is_public"),
        }
    }
}
