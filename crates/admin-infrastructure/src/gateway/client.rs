//! Shared HTTP client for tables, storage and auth

use std::time::Duration;

use reqwest::header::CONTENT_RANGE;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use admin_shared::config::GatewaySettings;

use super::query::{parse_content_range, TableQuery};
use crate::error::GatewayError;

const MAX_ERROR_BODY: usize = 300;

#[derive(Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    service_key: String,
}

impl GatewayClient {
    pub fn new(settings: &GatewaySettings) -> Result<Self, GatewayError> {
        let base_url = settings.url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(GatewayError::Config("gateway.url is empty".to_string()));
        }
        if settings.service_key.trim().is_empty() {
            return Err(GatewayError::Config("gateway.service_key is empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds.max(1)))
            .build()?;

        Ok(Self {
            http,
            base_url,
            api_key: settings.api_key.trim().to_string(),
            service_key: settings.service_key.trim().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/{service}/v1/{path}`
    pub fn endpoint(&self, service: &str, path: &str) -> String {
        format!(
            "{}/{}/v1/{}",
            self.base_url,
            service,
            path.trim_start_matches('/')
        )
    }

    /// Request made with the service key (tables and storage)
    pub fn service_request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    /// Request made with the public key (auth endpoints)
    pub fn public_request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Request made on behalf of a signed-in user
    pub fn user_request(&self, method: Method, url: &str, access_token: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
    }

    /// Send and turn any non-2xx status into `GatewayError::Status`
    pub async fn execute(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<Response, GatewayError> {
        let response = request.send().await.map_err(|e| {
            error!("{} failed to reach gateway: {}", operation, e);
            GatewayError::Transport(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = error_from_body(status, &body);
        if status == StatusCode::RANGE_NOT_SATISFIABLE {
            debug!("{} out of range", operation);
        } else {
            error!("{} failed with {}: {}", operation, status, err.message());
        }
        Err(err)
    }

    pub async fn json<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<T, GatewayError> {
        let response = self.execute(operation, request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::Decode(format!("{}: {}", operation, e)))
    }

    pub fn table(&self, name: &'static str) -> Table<'_> {
        Table { client: self, name }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
    code: Option<serde_json::Value>,
    error_code: Option<String>,
}

/// PostgREST sends `{message, code, details, hint}`; storage and auth use
/// `message`, `msg`, `error` or `error_description`.
fn error_from_body(status: StatusCode, body: &str) -> GatewayError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

    let code = parsed.error_code.or_else(|| match parsed.code {
        Some(serde_json::Value::String(code)) => Some(code),
        _ => None,
    });
    let message = parsed
        .message
        .or(parsed.msg)
        .or(parsed.error_description)
        .or(parsed.error)
        .or_else(|| {
            let text = body.trim();
            (!text.is_empty()).then(|| text.chars().take(MAX_ERROR_BODY).collect())
        })
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

    GatewayError::Status {
        status,
        code,
        message,
    }
}

/// One PostgREST table
pub struct Table<'a> {
    client: &'a GatewayClient,
    name: &'static str,
}

impl Table<'_> {
    fn url(&self) -> String {
        self.client.endpoint("rest", self.name)
    }

    fn request(&self, method: Method, query: &TableQuery) -> RequestBuilder {
        self.client
            .service_request(method, &self.url())
            .query(query.params())
    }

    pub async fn select<T: DeserializeOwned>(&self, query: &TableQuery) -> Result<Vec<T>, GatewayError> {
        debug!(table = self.name, params = ?query.params(), "select");
        self.client
            .json(&format!("select {}", self.name), self.request(Method::GET, query))
            .await
    }

    pub async fn select_one<T: DeserializeOwned>(
        &self,
        query: &TableQuery,
    ) -> Result<Option<T>, GatewayError> {
        Ok(self.select(query).await?.into_iter().next())
    }

    /// Rows `from..=to` plus the exact total. A range past the end is an empty page.
    pub async fn select_range<T: DeserializeOwned>(
        &self,
        query: &TableQuery,
        from: u64,
        to: u64,
    ) -> Result<(Vec<T>, u64), GatewayError> {
        debug!(table = self.name, params = ?query.params(), from, to, "select range");
        let request = self
            .request(Method::GET, query)
            .header("Prefer", "count=exact")
            .header("Range-Unit", "items")
            .header("Range", format!("{}-{}", from, to));

        let operation = format!("select range {}", self.name);
        let response = match self.client.execute(&operation, request).await {
            Ok(response) => response,
            Err(e) if e.status() == Some(StatusCode::RANGE_NOT_SATISFIABLE) => {
                let total = self.count(query).await?;
                return Ok((Vec::new(), total));
            }
            Err(e) => return Err(e),
        };

        let total = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range);
        let rows: Vec<T> = response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(format!("{}: {}", operation, e)))?;
        let total = total.unwrap_or(from + rows.len() as u64);
        Ok((rows, total))
    }

    /// Exact number of rows matching `query`
    pub async fn count(&self, query: &TableQuery) -> Result<u64, GatewayError> {
        let operation = format!("count {}", self.name);
        let response = self
            .client
            .execute(
                &operation,
                self.request(Method::HEAD, query).header("Prefer", "count=exact"),
            )
            .await?;

        response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range)
            .ok_or_else(|| GatewayError::Decode(format!("{}: missing Content-Range", operation)))
    }

    pub async fn insert<B, T>(&self, body: &B) -> Result<Vec<T>, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .client
            .service_request(Method::POST, &self.url())
            .header("Prefer", "return=representation")
            .json(body);
        self.client
            .json(&format!("insert {}", self.name), request)
            .await
    }

    pub async fn insert_one<B, T>(&self, body: &B) -> Result<T, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.insert(body)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::Decode(format!("insert {} returned no row", self.name)))
    }

    /// Patch matching rows and return them
    pub async fn update<B, T>(&self, query: &TableQuery, body: &B) -> Result<Vec<T>, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .request(Method::PATCH, query)
            .header("Prefer", "return=representation")
            .json(body);
        self.client
            .json(&format!("update {}", self.name), request)
            .await
    }

    pub async fn delete(&self, query: &TableQuery) -> Result<(), GatewayError> {
        self.client
            .execute(&format!("delete {}", self.name), self.request(Method::DELETE, query))
            .await?;
        Ok(())
    }
}
