//! Menu repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Menu, MenuDraft};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// All menus ordered by `sort_order`
    async fn list_all(&self) -> Result<Vec<Menu>, DomainError>;
    /// Menus with `is_visible = true`, ordered by `sort_order`
    async fn list_visible(&self) -> Result<Vec<Menu>, DomainError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Menu>, DomainError>;
    async fn create(&self, draft: &MenuDraft) -> Result<Menu, DomainError>;
    async fn update(&self, id: &Uuid, draft: &MenuDraft) -> Result<Menu, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
}
