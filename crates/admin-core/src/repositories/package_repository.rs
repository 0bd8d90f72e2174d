//! Package repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewPackage, Package, PackagePatch};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PackageRepository: Send + Sync {
    /// All packages, newest first
    async fn list_all(&self) -> Result<Vec<Package>, DomainError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Package>, DomainError>;
    async fn create(&self, package: &NewPackage) -> Result<Package, DomainError>;
    async fn update(&self, id: &Uuid, patch: &PackagePatch) -> Result<Package, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
    async fn count(&self) -> Result<u64, DomainError>;
}
