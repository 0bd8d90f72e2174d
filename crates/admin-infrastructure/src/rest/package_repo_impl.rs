// ============================================================================
// Admin Infrastructure - REST Package Repository
// File: crates/admin-infrastructure/src/rest/package_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use admin_core::domain::{NewPackage, Package, PackagePatch};
use admin_core::error::DomainError;
use admin_core::repositories::PackageRepository;
use admin_shared::constants::TABLE_PACKAGES;

use crate::gateway::{GatewayClient, TableQuery};

pub struct RestPackageRepository {
    client: GatewayClient,
}

impl RestPackageRepository {
    pub fn new(client: GatewayClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PackageRepository for RestPackageRepository {
    async fn list_all(&self) -> Result<Vec<Package>, DomainError> {
        let rows: Vec<PackageRow> = self
            .client
            .table(TABLE_PACKAGES)
            .select(&TableQuery::all().order("created_at", false))
            .await?;
        Ok(rows.into_iter().map(Package::from).collect())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Package>, DomainError> {
        let row: Option<PackageRow> = self
            .client
            .table(TABLE_PACKAGES)
            .select_one(&TableQuery::all().eq("id", id))
            .await?;
        Ok(row.map(Package::from))
    }

    async fn create(&self, package: &NewPackage) -> Result<Package, DomainError> {
        info!("Recording package {} {}", package.name, package.version);
        let row: PackageRow = self.client.table(TABLE_PACKAGES).insert_one(package).await?;
        Ok(row.into())
    }

    async fn update(&self, id: &Uuid, patch: &PackagePatch) -> Result<Package, DomainError> {
        let rows: Vec<PackageRow> = self
            .client
            .table(TABLE_PACKAGES)
            .update(&TableQuery::default().eq("id", id), patch)
            .await?;
        rows.into_iter()
            .next()
            .map(Package::from)
            .ok_or_else(|| DomainError::NotFound(format!("package {}", id)))
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        self.client
            .table(TABLE_PACKAGES)
            .delete(&TableQuery::default().eq("id", id))
            .await?;
        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self
            .client
            .table(TABLE_PACKAGES)
            .count(&TableQuery::default().select("id"))
            .await?)
    }
}

#[derive(Debug, Deserialize)]
struct PackageRow {
    id: Uuid,
    name: String,
    version: String,
    description: Option<String>,
    file_name: String,
    file_path: String,
    file_size: Option<i64>,
    uploaded_by: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<PackageRow> for Package {
    fn from(row: PackageRow) -> Self {
        Package {
            id: row.id,
            name: row.name,
            version: row.version,
            description: row.description,
            file_name: row.file_name,
            file_path: row.file_path,
            file_size: row.file_size.unwrap_or(0).max(0) as u64,
            uploaded_by: row.uploaded_by,
            created_at: row.created_at,
            updated_at: row.updated_at.unwrap_or(row.created_at),
        }
    }
}
