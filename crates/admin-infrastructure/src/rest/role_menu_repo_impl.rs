// ============================================================================
// Admin Infrastructure - REST Role Menu Repository
// File: crates/admin-infrastructure/src/rest/role_menu_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use admin_core::domain::{Role, RoleMenu};
use admin_core::error::DomainError;
use admin_core::repositories::RoleMenuRepository;
use admin_shared::constants::TABLE_ROLE_MENUS;

use crate::gateway::{GatewayClient, TableQuery};

pub struct RestRoleMenuRepository {
    client: GatewayClient,
}

impl RestRoleMenuRepository {
    pub fn new(client: GatewayClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct MenuIdRow {
    menu_id: Uuid,
}

#[async_trait]
impl RoleMenuRepository for RestRoleMenuRepository {
    async fn list_all(&self) -> Result<Vec<RoleMenu>, DomainError> {
        Ok(self
            .client
            .table(TABLE_ROLE_MENUS)
            .select(&TableQuery::default().select("role,menu_id"))
            .await?)
    }

    async fn menu_ids_for_role(&self, role: Role) -> Result<Vec<Uuid>, DomainError> {
        let rows: Vec<MenuIdRow> = self
            .client
            .table(TABLE_ROLE_MENUS)
            .select(&TableQuery::default().select("menu_id").eq("role", role))
            .await?;
        Ok(rows.into_iter().map(|r| r.menu_id).collect())
    }

    async fn delete_by_role(&self, role: Role) -> Result<(), DomainError> {
        debug!("Deleting menu grants of role {}", role);
        self.client
            .table(TABLE_ROLE_MENUS)
            .delete(&TableQuery::default().eq("role", role))
            .await?;
        Ok(())
    }

    async fn insert_many(&self, grants: &[RoleMenu]) -> Result<(), DomainError> {
        if grants.is_empty() {
            return Ok(());
        }
        let _: Vec<serde_json::Value> = self.client.table(TABLE_ROLE_MENUS).insert(grants).await?;
        Ok(())
    }
}
