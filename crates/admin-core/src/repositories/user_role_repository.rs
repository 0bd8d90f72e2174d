//! User-role repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Role, UserRole};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRoleRepository: Send + Sync {
    async fn find_role(&self, user_id: &Uuid) -> Result<Option<Role>, DomainError>;
    async fn list_all(&self) -> Result<Vec<UserRole>, DomainError>;
    async fn set_role(&self, user_id: &Uuid, role: Role) -> Result<(), DomainError>;
}
