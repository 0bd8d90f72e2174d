//! Object storage adapter over `/storage/v1`

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use admin_core::error::DomainError;
use admin_core::repositories::ObjectStorage;
use admin_shared::constants::UPLOAD_CACHE_CONTROL;

use crate::error::GatewayError;
use crate::gateway::GatewayClient;

pub struct RestObjectStorage {
    client: GatewayClient,
}

#[derive(Serialize)]
struct RemoveRequest<'a> {
    prefixes: &'a [String],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignRequest {
    expires_in: u64,
}

#[derive(Deserialize)]
struct SignResponse {
    #[serde(rename = "signedURL", alias = "signedUrl")]
    signed_url: String,
}

fn storage_error(err: GatewayError) -> DomainError {
    DomainError::StorageError(err.message())
}

impl RestObjectStorage {
    pub fn new(client: GatewayClient) -> Self {
        Self { client }
    }

    fn object_url(&self, bucket: &str, path: &str) -> String {
        self.client
            .endpoint("storage", &format!("object/{}/{}", bucket, path))
    }
}

#[async_trait]
impl ObjectStorage for RestObjectStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<(), DomainError> {
        info!("Uploading {} bytes to {}/{}", bytes.len(), bucket, path);
        let request = self
            .client
            .service_request(Method::POST, &self.object_url(bucket, path))
            .header(CONTENT_TYPE, content_type)
            .header(CACHE_CONTROL, format!("max-age={}", UPLOAD_CACHE_CONTROL))
            .header("x-upsert", "false")
            .body(bytes);

        self.client
            .execute("storage upload", request)
            .await
            .map_err(storage_error)?;
        Ok(())
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), DomainError> {
        if paths.is_empty() {
            return Ok(());
        }
        debug!("Removing {:?} from {}", paths, bucket);
        let url = self.client.endpoint("storage", &format!("object/{}", bucket));
        let request = self
            .client
            .service_request(Method::DELETE, &url)
            .json(&RemoveRequest { prefixes: paths });

        self.client
            .execute("storage remove", request)
            .await
            .map_err(storage_error)?;
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        self.client
            .endpoint("storage", &format!("object/public/{}/{}", bucket, path))
    }

    async fn signed_url(
        &self,
        bucket: &str,
        path: &str,
        ttl_seconds: u64,
    ) -> Result<String, DomainError> {
        let url = self
            .client
            .endpoint("storage", &format!("object/sign/{}/{}", bucket, path));
        let request = self
            .client
            .service_request(Method::POST, &url)
            .json(&SignRequest { expires_in: ttl_seconds });

        let signed: SignResponse = self
            .client
            .json("storage sign", request)
            .await
            .map_err(storage_error)?;

        // The gateway answers with a path relative to `/storage/v1`
        Ok(self.client.endpoint("storage", &signed.signed_url))
    }
}
