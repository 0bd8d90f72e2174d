//! Upload validation and object naming
//!
//! Every asset is checked against its policy before any network call.

use bytes::Bytes;
use chrono::Utc;
use rand::distr::Alphanumeric;
use rand::Rng;
use serde::Serialize;

use admin_shared::constants::{MAX_IMAGE_SIZE, MAX_PACKAGE_SIZE, MAX_VIDEO_SIZE};
use admin_shared::utils::{file_extension, format_file_size};

use crate::error::DomainError;

/// Allow-list and size ceiling for one kind of asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilePolicy {
    pub label: &'static str,
    pub extensions: &'static [&'static str],
    pub mime_types: &'static [&'static str],
    pub max_size: u64,
    pub prefix: &'static str,
}

impl FilePolicy {
    pub const PACKAGE: FilePolicy = FilePolicy {
        label: "package",
        extensions: &["exe"],
        mime_types: &[],
        max_size: MAX_PACKAGE_SIZE,
        prefix: "packages",
    };

    pub const VIDEO: FilePolicy = FilePolicy {
        label: "video",
        extensions: &["mp4"],
        mime_types: &["video/mp4"],
        max_size: MAX_VIDEO_SIZE,
        prefix: "videos",
    };

    pub const IMAGE: FilePolicy = FilePolicy {
        label: "image",
        extensions: &["jpg", "jpeg", "png", "gif", "webp", "bmp"],
        mime_types: &["image/jpeg", "image/png", "image/gif", "image/webp", "image/bmp"],
        max_size: MAX_IMAGE_SIZE,
        prefix: "images",
    };

    fn accepts_type(&self, extension: Option<&str>, content_type: Option<&str>) -> bool {
        let by_extension = extension.is_some_and(|ext| self.extensions.contains(&ext));
        let by_mime = content_type.is_some_and(|mime| self.mime_types.contains(&mime));
        by_extension || by_mime
    }

    /// Validate name, type and size. Returns the extension used for the object name.
    pub fn check(
        &self,
        file_name: &str,
        content_type: Option<&str>,
        size: u64,
    ) -> Result<String, DomainError> {
        let extension = file_extension(file_name);
        if !self.accepts_type(extension.as_deref(), content_type) {
            return Err(DomainError::FileRejected(format!(
                "{} must be one of: .{}",
                self.label,
                self.extensions.join(", .")
            )));
        }
        if size > self.max_size {
            return Err(DomainError::FileRejected(format!(
                "{} exceeds the {} limit",
                self.label,
                format_file_size(self.max_size)
            )));
        }
        Ok(extension.unwrap_or_else(|| self.extensions[0].to_string()))
    }

    /// Object path `{prefix}/{unix_millis}-{random}.{ext}`
    pub fn object_path(&self, extension: &str) -> String {
        let suffix: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(7)
            .map(char::from)
            .collect::<String>()
            .to_lowercase();
        format!(
            "{}/{}-{}.{}",
            self.prefix,
            Utc::now().timestamp_millis(),
            suffix,
            extension
        )
    }
}

/// Uploaded file as received from a multipart form
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Validate against `policy` and pick the object path
    pub fn prepare(&self, policy: &FilePolicy) -> Result<PreparedUpload, DomainError> {
        let extension = policy.check(&self.file_name, self.content_type.as_deref(), self.size())?;
        Ok(PreparedUpload {
            path: policy.object_path(&extension),
            content_type: self
                .content_type
                .clone()
                .unwrap_or_else(|| "application/octet-stream".to_string()),
            bytes: self.bytes.clone(),
        })
    }
}

/// Validated upload ready to be sent to object storage
#[derive(Debug, Clone)]
pub struct PreparedUpload {
    pub path: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Kind of media a workflow can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Image,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Image => "image",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "video" => Some(MediaKind::Video),
            "image" => Some(MediaKind::Image),
            _ => None,
        }
    }

    pub fn policy(&self) -> &'static FilePolicy {
        match self {
            MediaKind::Video => &FilePolicy::VIDEO,
            MediaKind::Image => &FilePolicy::IMAGE,
        }
    }

    /// Classify an uploaded file by extension or MIME type
    pub fn detect(file_name: &str, content_type: Option<&str>) -> Result<Self, DomainError> {
        let extension = file_extension(file_name);
        if FilePolicy::VIDEO.accepts_type(extension.as_deref(), content_type) {
            return Ok(MediaKind::Video);
        }
        if FilePolicy::IMAGE.accepts_type(extension.as_deref(), content_type) {
            return Ok(MediaKind::Image);
        }
        Err(DomainError::FileRejected(
            "media must be an .mp4 video or a jpg, png, gif, webp or bmp image".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use admin_shared::constants::MIB;

    #[test]
    fn test_oversized_package_rejected() {
        let result = FilePolicy::PACKAGE.check("setup.exe", None, 1_200_000_000);
        assert!(matches!(result, Err(DomainError::FileRejected(_))));
    }

    #[test]
    fn test_package_under_limit_accepted() {
        let ext = FilePolicy::PACKAGE.check("Setup.EXE", None, 900_000_000).unwrap();
        assert_eq!(ext, "exe");
    }

    #[test]
    fn test_zip_rejected_regardless_of_size() {
        assert!(FilePolicy::PACKAGE.check("bundle.zip", None, 10).is_err());
        assert!(FilePolicy::PACKAGE.check("bundle.zip", None, 0).is_err());
    }

    #[test]
    fn test_video_accepted_by_mime() {
        let ext = FilePolicy::VIDEO.check("clip", Some("video/mp4"), 5 * MIB).unwrap();
        assert_eq!(ext, "mp4");
        assert!(FilePolicy::VIDEO.check("clip.mp4", None, 201 * MIB).is_err());
    }

    #[test]
    fn test_image_limit() {
        assert!(FilePolicy::IMAGE.check("shot.webp", None, 10 * MIB).is_ok());
        assert!(FilePolicy::IMAGE.check("shot.webp", None, 10 * MIB + 1).is_err());
        assert!(FilePolicy::IMAGE.check("shot.tiff", None, 1).is_err());
    }

    #[test]
    fn test_object_path_shape() {
        let path = FilePolicy::VIDEO.object_path("mp4");
        let (prefix, name) = path.split_once('/').unwrap();
        assert_eq!(prefix, "videos");
        let (stem, ext) = name.rsplit_once('.').unwrap();
        assert_eq!(ext, "mp4");
        let (millis, random) = stem.split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(random.len(), 7);
        assert!(random.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_detect_media_kind() {
        assert_eq!(MediaKind::detect("a.mp4", None).unwrap(), MediaKind::Video);
        assert_eq!(MediaKind::detect("a.PNG", None).unwrap(), MediaKind::Image);
        assert!(MediaKind::detect("a.mov", Some("video/quicktime")).is_err());
    }
}
