//! Role-menu grant repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Role, RoleMenu};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleMenuRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<RoleMenu>, DomainError>;
    async fn menu_ids_for_role(&self, role: Role) -> Result<Vec<Uuid>, DomainError>;
    async fn delete_by_role(&self, role: Role) -> Result<(), DomainError>;
    async fn insert_many(&self, grants: &[RoleMenu]) -> Result<(), DomainError>;
}
