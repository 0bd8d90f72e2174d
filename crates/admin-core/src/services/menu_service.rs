//! Menu administration

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::{Menu, MenuDraft};
use crate::error::DomainError;
use crate::repositories::MenuRepository;

pub struct MenuService {
    menus: Arc<dyn MenuRepository>,
}

impl MenuService {
    pub fn new(menus: Arc<dyn MenuRepository>) -> Self {
        Self { menus }
    }

    /// All menus ordered by `sort_order`
    pub async fn list(&self) -> Result<Vec<Menu>, DomainError> {
        self.menus.list_all().await
    }

    pub async fn create(&self, draft: MenuDraft) -> Result<Menu, DomainError> {
        let draft = draft.normalized()?;
        let menu = self.menus.create(&draft).await?;
        info!("Menu created: {} ({})", menu.name, menu.id);
        Ok(menu)
    }

    pub async fn update(&self, id: Uuid, draft: MenuDraft) -> Result<Menu, DomainError> {
        let draft = draft.normalized()?;
        if draft.parent_id == Some(id) {
            return Err(DomainError::ValidationError(
                "A menu cannot be its own parent".to_string(),
            ));
        }
        let menu = self.menus.update(&id, &draft).await?;
        info!("Menu updated: {} ({})", menu.name, menu.id);
        Ok(menu)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.menus.delete(&id).await?;
        info!("Menu deleted: {}", id);
        Ok(())
    }

    /// Top-level menus a menu may be nested under, excluding `exclude` itself
    pub async fn parent_candidates(&self, exclude: Option<Uuid>) -> Result<Vec<Menu>, DomainError> {
        Ok(self
            .menus
            .list_all()
            .await?
            .into_iter()
            .filter(|m| m.is_root_menu() && Some(m.id) != exclude)
            .collect())
    }
}
