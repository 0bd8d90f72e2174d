//! Profile repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Profile, ProfilePatch};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_user_id(&self, user_id: &Uuid) -> Result<Option<Profile>, DomainError>;
    /// All profiles, newest first
    async fn list_all(&self) -> Result<Vec<Profile>, DomainError>;
    async fn update(&self, id: &Uuid, patch: &ProfilePatch) -> Result<Profile, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
    async fn count(&self) -> Result<u64, DomainError>;
}
