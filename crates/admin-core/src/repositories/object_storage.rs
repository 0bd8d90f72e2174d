//! Object storage port

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upload a new object. Existing objects are never overwritten.
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<(), DomainError>;

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), DomainError>;

    /// Permanent URL for a public bucket object
    fn public_url(&self, bucket: &str, path: &str) -> String;

    async fn signed_url(
        &self,
        bucket: &str,
        path: &str,
        ttl_seconds: u64,
    ) -> Result<String, DomainError>;
}
