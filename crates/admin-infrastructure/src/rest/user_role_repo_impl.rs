// ============================================================================
// Admin Infrastructure - REST User Role Repository
// File: crates/admin-infrastructure/src/rest/user_role_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use admin_core::domain::{Role, UserRole};
use admin_core::error::DomainError;
use admin_core::repositories::UserRoleRepository;
use admin_shared::constants::TABLE_USER_ROLES;

use crate::gateway::{GatewayClient, TableQuery};

pub struct RestUserRoleRepository {
    client: GatewayClient,
}

impl RestUserRoleRepository {
    pub fn new(client: GatewayClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct RoleRow {
    role: Role,
}

#[derive(Debug, Serialize)]
struct RolePatch {
    role: Role,
}

#[derive(Debug, Serialize)]
struct NewUserRole<'a> {
    user_id: &'a Uuid,
    role: Role,
}

#[async_trait]
impl UserRoleRepository for RestUserRoleRepository {
    async fn find_role(&self, user_id: &Uuid) -> Result<Option<Role>, DomainError> {
        let row: Option<RoleRow> = self
            .client
            .table(TABLE_USER_ROLES)
            .select_one(&TableQuery::default().select("role").eq("user_id", user_id))
            .await?;
        Ok(row.map(|r| r.role))
    }

    async fn list_all(&self) -> Result<Vec<UserRole>, DomainError> {
        Ok(self
            .client
            .table(TABLE_USER_ROLES)
            .select(&TableQuery::default().select("user_id,role,created_at"))
            .await?)
    }

    /// Update the user's role row, inserting it when the user has none yet
    async fn set_role(&self, user_id: &Uuid, role: Role) -> Result<(), DomainError> {
        let table = self.client.table(TABLE_USER_ROLES);
        let updated: Vec<serde_json::Value> = table
            .update(&TableQuery::default().eq("user_id", user_id), &RolePatch { role })
            .await?;

        if updated.is_empty() {
            info!("User {} had no role row, inserting {}", user_id, role);
            let _: Vec<serde_json::Value> = table.insert(&NewUserRole { user_id, role }).await?;
        }
        Ok(())
    }
}
