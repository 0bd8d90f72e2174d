// ============================================================================
// Admin Infrastructure - REST Profile Repository
// File: crates/admin-infrastructure/src/rest/profile_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use admin_core::domain::{Profile, ProfilePatch, ProfileStatus};
use admin_core::error::DomainError;
use admin_core::repositories::ProfileRepository;
use admin_shared::constants::{DEFAULT_PROFILE_STATUS, TABLE_PROFILES};

use crate::gateway::{GatewayClient, TableQuery};

pub struct RestProfileRepository {
    client: GatewayClient,
}

impl RestProfileRepository {
    pub fn new(client: GatewayClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfileRepository for RestProfileRepository {
    async fn find_by_user_id(&self, user_id: &Uuid) -> Result<Option<Profile>, DomainError> {
        let row: Option<ProfileRow> = self
            .client
            .table(TABLE_PROFILES)
            .select_one(&TableQuery::all().eq("user_id", user_id))
            .await?;
        Ok(row.map(Profile::from))
    }

    async fn list_all(&self) -> Result<Vec<Profile>, DomainError> {
        let rows: Vec<ProfileRow> = self
            .client
            .table(TABLE_PROFILES)
            .select(&TableQuery::all().order("created_at", false))
            .await?;
        Ok(rows.into_iter().map(Profile::from).collect())
    }

    async fn update(&self, id: &Uuid, patch: &ProfilePatch) -> Result<Profile, DomainError> {
        let rows: Vec<ProfileRow> = self
            .client
            .table(TABLE_PROFILES)
            .update(&TableQuery::default().eq("id", id), patch)
            .await?;
        rows.into_iter()
            .next()
            .map(Profile::from)
            .ok_or_else(|| DomainError::NotFound(format!("profile {}", id)))
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        self.client
            .table(TABLE_PROFILES)
            .delete(&TableQuery::default().eq("id", id))
            .await?;
        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self
            .client
            .table(TABLE_PROFILES)
            .count(&TableQuery::default().select("id"))
            .await?)
    }
}

#[derive(Debug, Deserialize)]
struct ProfileRow {
    id: Uuid,
    user_id: Uuid,
    username: String,
    email: String,
    avatar_url: Option<String>,
    status: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        let status = row.status.as_deref().unwrap_or(DEFAULT_PROFILE_STATUS);
        Profile {
            id: row.id,
            user_id: row.user_id,
            username: row.username,
            email: row.email,
            avatar_url: row.avatar_url,
            status: ProfileStatus::from_str(status),
            created_at: row.created_at,
        }
    }
}
