//! Package administration: installer uploads, metadata and signed downloads

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    FilePolicy, NewPackage, Package, PackageDownload, PackageForm, PackagePatch, PreparedUpload,
    UploadFile,
};
use crate::error::DomainError;
use crate::repositories::{ObjectStorage, PackageRepository};
use crate::saga::{RetryPolicy, Saga};

pub struct PackageService {
    packages: Arc<dyn PackageRepository>,
    storage: Arc<dyn ObjectStorage>,
    bucket: String,
    download_ttl_seconds: u64,
    retry: RetryPolicy,
}

impl PackageService {
    pub fn new(
        packages: Arc<dyn PackageRepository>,
        storage: Arc<dyn ObjectStorage>,
        bucket: impl Into<String>,
        download_ttl_seconds: u64,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            packages,
            storage,
            bucket: bucket.into(),
            download_ttl_seconds,
            retry,
        }
    }

    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Package>, DomainError> {
        let packages = self.packages.list_all().await?;
        Ok(match search {
            Some(term) => packages.into_iter().filter(|p| p.matches(term)).collect(),
            None => packages,
        })
    }

    async fn find(&self, id: Uuid) -> Result<Package, DomainError> {
        self.packages
            .find_by_id(&id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("package {}", id)))
    }

    /// Upload `prepared` and register its removal as the saga's undo step
    async fn upload(&self, saga: &mut Saga, prepared: &PreparedUpload) -> Result<(), DomainError> {
        self.storage
            .upload(&self.bucket, &prepared.path, prepared.bytes.clone(), &prepared.content_type)
            .await?;

        let storage = self.storage.clone();
        let bucket = self.bucket.clone();
        let paths = vec![prepared.path.clone()];
        saga.on_rollback(format!("remove {}", prepared.path), move || {
            let storage = storage.clone();
            let bucket = bucket.clone();
            let paths = paths.clone();
            async move { storage.remove(&bucket, &paths).await }
        });
        Ok(())
    }

    /// Best-effort removal; failures are logged only
    async fn discard(&self, path: &str) {
        if let Err(e) = self.storage.remove(&self.bucket, &[path.to_string()]).await {
            warn!("Failed to remove package object {}: {}", path, e);
        }
    }

    pub async fn create(
        &self,
        form: PackageForm,
        file: UploadFile,
        uploaded_by: Option<Uuid>,
    ) -> Result<Package, DomainError> {
        let form = form.normalized()?;
        let prepared = file.prepare(&FilePolicy::PACKAGE)?;

        let mut saga = Saga::new("packages.create", self.retry);
        self.upload(&mut saga, &prepared).await?;

        let row = NewPackage {
            name: form.name,
            version: form.version,
            description: form.description,
            file_name: file.file_name.clone(),
            file_path: prepared.path.clone(),
            file_size: file.size(),
            uploaded_by,
        };

        match self.packages.create(&row).await {
            Ok(package) => {
                saga.commit();
                info!("Package created: {} {} ({})", package.name, package.version, package.id);
                Ok(package)
            }
            Err(e) => saga.abort(e).await,
        }
    }

    /// Patch metadata. A replacement file is uploaded first; the old object
    /// is removed only after the row points at the new one.
    pub async fn update(
        &self,
        id: Uuid,
        form: PackageForm,
        file: Option<UploadFile>,
    ) -> Result<Package, DomainError> {
        let form = form.normalized()?;
        let prepared = file
            .as_ref()
            .map(|f| f.prepare(&FilePolicy::PACKAGE))
            .transpose()?;
        let existing = self.find(id).await?;

        let mut patch = PackagePatch::metadata(form);
        let mut saga = Saga::new("packages.update", self.retry);
        if let (Some(file), Some(prepared)) = (file.as_ref(), prepared.as_ref()) {
            self.upload(&mut saga, prepared).await?;
            patch.file_name = Some(file.file_name.clone());
            patch.file_path = Some(prepared.path.clone());
            patch.file_size = Some(file.size());
        }

        let package = match self.packages.update(&id, &patch).await {
            Ok(package) => package,
            Err(e) => return saga.abort(e).await,
        };
        saga.commit();

        if prepared.is_some() {
            self.discard(&existing.file_path).await;
        }
        info!("Package updated: {} {} ({})", package.name, package.version, package.id);
        Ok(package)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let existing = self.find(id).await?;
        self.discard(&existing.file_path).await;
        self.packages.delete(&id).await?;
        info!("Package deleted: {}", id);
        Ok(())
    }

    pub async fn download(&self, id: Uuid) -> Result<PackageDownload, DomainError> {
        let package = self.find(id).await?;
        let url = self
            .storage
            .signed_url(&self.bucket, &package.file_path, self.download_ttl_seconds)
            .await?;
        Ok(PackageDownload {
            file_name: package.file_name,
            url,
            expires_in: self.download_ttl_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{MockObjectStorage, MockPackageRepository};
    use crate::services::test_support::*;
    use mockall::predicate::eq;

    fn service(packages: MockPackageRepository, storage: MockObjectStorage) -> PackageService {
        PackageService::new(
            Arc::new(packages),
            Arc::new(storage),
            "packages",
            60,
            RetryPolicy::immediate(2),
        )
    }

    fn form() -> PackageForm {
        PackageForm {
            name: "Agent".to_string(),
            version: "2.0.0".to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_uploads_then_inserts() {
        let mut storage = MockObjectStorage::new();
        storage
            .expect_upload()
            .withf(|bucket, path, _, _| bucket == "packages" && path.starts_with("packages/") && path.ends_with(".exe"))
            .times(1)
            .returning(|_, _, _, _| Ok(()));
        storage.expect_remove().times(0);
        let mut packages = MockPackageRepository::new();
        packages
            .expect_create()
            .withf(|row| row.file_name == "agent.exe" && row.file_size == 16)
            .times(1)
            .returning(|row| Ok(package(&row.file_path)));

        let created = service(packages, storage)
            .create(form(), upload("agent.exe", 16), None)
            .await
            .unwrap();
        assert!(created.file_path.starts_with("packages/"));
    }

    #[tokio::test]
    async fn test_insert_failure_removes_uploaded_object() {
        let mut storage = MockObjectStorage::new();
        storage.expect_upload().returning(|_, _, _, _| Ok(()));
        storage
            .expect_remove()
            .withf(|bucket, paths| bucket == "packages" && paths.len() == 1 && paths[0].starts_with("packages/"))
            .times(1)
            .returning(|_, _| Ok(()));
        let mut packages = MockPackageRepository::new();
        packages.expect_create().returning(|_| Err(gateway_error()));

        let result = service(packages, storage)
            .create(form(), upload("agent.exe", 16), None)
            .await;
        assert_eq!(result, Err(gateway_error()));
    }

    #[tokio::test]
    async fn test_rejected_file_never_reaches_storage() {
        let mut storage = MockObjectStorage::new();
        storage.expect_upload().times(0);
        let mut packages = MockPackageRepository::new();
        packages.expect_create().times(0);

        let result = service(packages, storage)
            .create(form(), upload("agent.zip", 16), None)
            .await;
        assert!(matches!(result, Err(DomainError::FileRejected(_))));
    }

    #[tokio::test]
    async fn test_update_with_file_removes_old_object_after_patch() {
        let existing = package("packages/old.exe");
        let id = existing.id;
        let mut packages = MockPackageRepository::new();
        packages
            .expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(existing.clone())));
        packages
            .expect_update()
            .withf(|_, patch| patch.file_path.as_deref().is_some_and(|p| p.starts_with("packages/")))
            .times(1)
            .returning(|_, patch| Ok(package(patch.file_path.as_deref().unwrap_or_default())));
        let mut storage = MockObjectStorage::new();
        storage.expect_upload().times(1).returning(|_, _, _, _| Ok(()));
        storage
            .expect_remove()
            .withf(|_, paths| paths.len() == 1 && paths[0] == "packages/old.exe")
            .times(1)
            .returning(|_, _| Ok(()));

        let updated = service(packages, storage)
            .update(id, form(), Some(upload("agent-v2.exe", 32)))
            .await
            .unwrap();
        assert_ne!(updated.file_path, "packages/old.exe");
    }

    #[tokio::test]
    async fn test_metadata_update_keeps_object() {
        let existing = package("packages/old.exe");
        let id = existing.id;
        let mut packages = MockPackageRepository::new();
        packages
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        packages
            .expect_update()
            .withf(|_, patch| patch.file_path.is_none())
            .returning(|_, _| Ok(package("packages/old.exe")));
        let mut storage = MockObjectStorage::new();
        storage.expect_upload().times(0);
        storage.expect_remove().times(0);

        assert!(service(packages, storage).update(id, form(), None).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_ignores_storage_failure() {
        let existing = package("packages/a.exe");
        let id = existing.id;
        let mut packages = MockPackageRepository::new();
        packages
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        packages.expect_delete().with(eq(id)).times(1).returning(|_| Ok(()));
        let mut storage = MockObjectStorage::new();
        storage
            .expect_remove()
            .returning(|_, _| Err(DomainError::StorageError("gone".to_string())));

        assert!(service(packages, storage).delete(id).await.is_ok());
    }

    #[tokio::test]
    async fn test_download_is_signed_for_sixty_seconds() {
        let existing = package("packages/a.exe");
        let id = existing.id;
        let mut packages = MockPackageRepository::new();
        packages
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        let mut storage = MockObjectStorage::new();
        storage
            .expect_signed_url()
            .with(eq("packages"), eq("packages/a.exe"), eq(60u64))
            .returning(|_, _, _| Ok("https://cdn.example.com/signed".to_string()));

        let download = service(packages, storage).download(id).await.unwrap();
        assert_eq!(download.file_name, "agent.exe");
        assert_eq!(download.expires_in, 60);
    }

    #[tokio::test]
    async fn test_missing_package_is_not_found() {
        let mut packages = MockPackageRepository::new();
        packages.expect_find_by_id().returning(|_| Ok(None));

        let result = service(packages, MockObjectStorage::new())
            .download(Uuid::new_v4())
            .await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }
}
