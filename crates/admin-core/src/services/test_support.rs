//! Fixtures shared by service tests

use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::*;

pub fn menu(n: u128, parent: Option<u128>, sort_order: i32) -> Menu {
    Menu {
        id: Uuid::from_u128(n),
        name: format!("menu-{n}"),
        path: Some(format!("/menu-{n}")),
        icon: None,
        parent_id: parent.map(Uuid::from_u128),
        sort_order,
        is_visible: true,
        created_at: None,
    }
}

pub fn profile(user_id: Uuid, username: &str) -> Profile {
    Profile {
        id: Uuid::new_v4(),
        user_id,
        username: username.to_string(),
        email: format!("{username}@example.com"),
        avatar_url: None,
        status: ProfileStatus::Active,
        created_at: Utc::now(),
    }
}

pub fn package(file_path: &str) -> Package {
    Package {
        id: Uuid::new_v4(),
        name: "Agent".to_string(),
        version: "1.0.0".to_string(),
        description: None,
        file_name: "agent.exe".to_string(),
        file_path: file_path.to_string(),
        file_size: 1024,
        uploaded_by: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn workflow(title: &str, video_path: Option<&str>) -> Workflow {
    Workflow {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: None,
        markdown_content: Some("# Steps".to_string()),
        media_type: video_path.map(|_| MediaKind::Video),
        video_path: video_path.map(String::from),
        video_size: video_path.map(|_| 2048),
        is_public: true,
        created_by: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn upload(file_name: &str, len: usize) -> UploadFile {
    UploadFile::new(file_name, None, Bytes::from(vec![0u8; len]))
}

pub fn gateway_error() -> crate::error::DomainError {
    crate::error::DomainError::GatewayError("connection reset".to_string())
}
