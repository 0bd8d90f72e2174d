// ============================================================================
// Admin Core - Package Entity
// File: crates/admin-core/src/domain/package.rs
// Description: Distributable installer stored in the packages bucket
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use admin_shared::utils::{contains_ignore_case, format_file_size, non_blank};

/// Package entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Package {
    pub id: Uuid,
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    pub file_name: String,
    pub file_path: String,
    pub file_size: u64,
    pub uploaded_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Package {
    pub fn matches(&self, term: &str) -> bool {
        contains_ignore_case(&self.name, term) || contains_ignore_case(&self.version, term)
    }

    pub fn display_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Package metadata form, shared by create and edit
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PackageForm {
    #[validate(length(min = 1, max = 200, message = "Package name is required"))]
    pub name: String,

    #[validate(length(min = 1, max = 50, message = "Package version is required"))]
    pub version: String,

    pub description: Option<String>,
}

impl PackageForm {
    pub fn normalized(self) -> Result<Self, validator::ValidationErrors> {
        let form = Self {
            name: self.name.trim().to_string(),
            version: self.version.trim().to_string(),
            description: non_blank(self.description),
        };
        form.validate()?;
        Ok(form)
    }
}

/// Row inserted into `packages`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewPackage {
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    pub file_name: String,
    pub file_path: String,
    pub file_size: u64,
    pub uploaded_by: Option<Uuid>,
}

/// Columns patched on `packages`; file columns only when the file is replaced
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PackagePatch {
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

impl PackagePatch {
    pub fn metadata(form: PackageForm) -> Self {
        Self {
            name: form.name,
            version: form.version,
            description: form.description,
            file_name: None,
            file_path: None,
            file_size: None,
        }
    }
}

/// Time-limited download link for a package
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PackageDownload {
    pub file_name: String,
    pub url: String,
    pub expires_in: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_requires_name_and_version() {
        let form = PackageForm {
            name: "Agent".to_string(),
            version: "  ".to_string(),
            description: None,
        };
        assert!(form.normalized().is_err());
    }

    #[test]
    fn test_metadata_patch_omits_file_columns() {
        let patch = PackagePatch::metadata(PackageForm {
            name: "Agent".to_string(),
            version: "1.2.0".to_string(),
            description: None,
        });
        let json = serde_json::to_value(&patch).unwrap();
        assert!(json.get("file_path").is_none());
        assert_eq!(json["description"], serde_json::Value::Null);
    }
}
