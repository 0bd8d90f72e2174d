//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub gateway: GatewaySettings,
    pub storage: StorageSettings,
    pub auth: AuthSettings,
    pub saga: SagaSettings,
    pub telemetry: TelemetrySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub cors_origin: String,
}

/// Hosted backend endpoint (tables, storage and auth share one base URL)
#[derive(Debug, Deserialize, Clone)]
pub struct GatewaySettings {
    pub url: String,
    /// Public (anon) key, sent as `apikey` on auth calls
    pub api_key: String,
    /// Service key used for table and storage calls made by this service
    pub service_key: String,
    pub timeout_seconds: u64,
    /// When set, access tokens are verified locally instead of asking the provider
    pub jwt_secret: Option<String>,
    pub jwt_audience: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub packages_bucket: String,
    pub workflows_bucket: String,
    pub signed_url_ttl_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    /// Send a SHA-256 hex digest instead of the raw password.
    /// Only for accounts created by the earlier console.
    pub legacy_password_digest: bool,
    pub sign_in_per_minute: u32,
    pub email_redirect_to: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SagaSettings {
    pub compensation_attempts: u32,
    pub compensation_backoff_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetrySettings {
    pub json: bool,
    pub log_dir: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "admin-server")?
            .set_default("app.cors_origin", "http://localhost:5173")?
            .set_default("gateway.timeout_seconds", 30)?
            .set_default("gateway.jwt_audience", "authenticated")?
            .set_default("storage.packages_bucket", crate::constants::PACKAGES_BUCKET)?
            .set_default("storage.workflows_bucket", crate::constants::WORKFLOWS_BUCKET)?
            .set_default(
                "storage.signed_url_ttl_seconds",
                crate::constants::DOWNLOAD_URL_TTL_SECONDS,
            )?
            .set_default("auth.legacy_password_digest", false)?
            .set_default("auth.sign_in_per_minute", 10)?
            .set_default("saga.compensation_attempts", 3)?
            .set_default("saga.compensation_backoff_ms", 250)?
            .set_default("telemetry.json", true)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        config.try_deserialize()
    }
}
