// ============================================================================
// Admin Infrastructure - REST Menu Repository
// File: crates/admin-infrastructure/src/rest/menu_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use admin_core::domain::{Menu, MenuDraft};
use admin_core::error::DomainError;
use admin_core::repositories::MenuRepository;
use admin_shared::constants::TABLE_MENUS;

use crate::gateway::{GatewayClient, TableQuery};

pub struct RestMenuRepository {
    client: GatewayClient,
}

impl RestMenuRepository {
    pub fn new(client: GatewayClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MenuRepository for RestMenuRepository {
    async fn list_all(&self) -> Result<Vec<Menu>, DomainError> {
        let rows: Vec<MenuRow> = self
            .client
            .table(TABLE_MENUS)
            .select(&TableQuery::all().order("sort_order", true))
            .await?;
        Ok(rows.into_iter().map(Menu::from).collect())
    }

    async fn list_visible(&self) -> Result<Vec<Menu>, DomainError> {
        let rows: Vec<MenuRow> = self
            .client
            .table(TABLE_MENUS)
            .select(
                &TableQuery::all()
                    .eq("is_visible", true)
                    .order("sort_order", true),
            )
            .await?;
        Ok(rows.into_iter().map(Menu::from).collect())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Menu>, DomainError> {
        let row: Option<MenuRow> = self
            .client
            .table(TABLE_MENUS)
            .select_one(&TableQuery::all().eq("id", id))
            .await?;
        Ok(row.map(Menu::from))
    }

    async fn create(&self, draft: &MenuDraft) -> Result<Menu, DomainError> {
        info!("Creating menu: {}", draft.name);
        let row: MenuRow = self.client.table(TABLE_MENUS).insert_one(draft).await?;
        Ok(row.into())
    }

    async fn update(&self, id: &Uuid, draft: &MenuDraft) -> Result<Menu, DomainError> {
        let rows: Vec<MenuRow> = self
            .client
            .table(TABLE_MENUS)
            .update(&TableQuery::default().eq("id", id), draft)
            .await?;
        rows.into_iter()
            .next()
            .map(Menu::from)
            .ok_or(DomainError::MenuNotFound(*id))
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        self.client
            .table(TABLE_MENUS)
            .delete(&TableQuery::default().eq("id", id))
            .await?;
        Ok(())
    }
}

// Internal row type; `sort_order` and `is_visible` are nullable columns
#[derive(Debug, Deserialize)]
struct MenuRow {
    id: Uuid,
    name: String,
    path: Option<String>,
    icon: Option<String>,
    parent_id: Option<Uuid>,
    sort_order: Option<i32>,
    is_visible: Option<bool>,
    created_at: Option<DateTime<Utc>>,
}

impl From<MenuRow> for Menu {
    fn from(row: MenuRow) -> Self {
        Menu {
            id: row.id,
            name: row.name,
            path: row.path,
            icon: row.icon,
            parent_id: row.parent_id,
            sort_order: row.sort_order.unwrap_or(0),
            is_visible: row.is_visible.unwrap_or(true),
            created_at: row.created_at,
        }
    }
}
