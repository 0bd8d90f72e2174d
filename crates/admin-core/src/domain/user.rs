// ============================================================================
// Admin Core - User Entities
// File: crates/admin-core/src/domain/user.rs
// Description: Profiles, user listing rows and user forms
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use admin_shared::utils::contains_ignore_case;

use super::role::Role;

/// Profile status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProfileStatus {
    #[default]
    Active,
    Disabled,
}

impl ProfileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileStatus::Active => "active",
            ProfileStatus::Disabled => "disabled",
        }
    }

    /// Unknown or missing values read as active
    pub fn from_str(s: &str) -> Self {
        match s {
            "disabled" | "inactive" => ProfileStatus::Disabled,
            _ => ProfileStatus::Active,
        }
    }
}

/// Profile entity (row of `profiles`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub status: ProfileStatus,
    pub created_at: DateTime<Utc>,
}

/// Profile joined with the user's role (the role row may be absent)
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserSummary {
    #[serde(flatten)]
    pub profile: Profile,
    pub role: Option<Role>,
}

impl UserSummary {
    pub fn matches(&self, term: &str) -> bool {
        contains_ignore_case(&self.profile.username, term)
            || contains_ignore_case(&self.profile.email, term)
    }
}

/// Create-user form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, max = 128, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "Username is required"))]
    pub username: String,

    #[serde(default)]
    pub role: Role,
}

/// Edit-user form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserUpdate {
    #[validate(length(min = 1, max = 100, message = "Username is required"))]
    pub username: String,

    #[serde(default)]
    pub status: ProfileStatus,

    pub role: Role,
}

/// Fields patched on a profile
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProfilePatch {
    pub username: String,
    pub status: ProfileStatus,
}
