use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{debug, info, warn};

use admin_api::{build_router, middleware::SignInLimiter, state::AppState};
use admin_core::saga::RetryPolicy;
use admin_core::services::{
    AccessResolver, AuthService, DashboardService, MenuService, PackageService,
    PermissionService, UserFlowService, UserService, WorkflowService,
};
use admin_infrastructure::{
    GatewayClient, RestAuthProvider, RestMenuRepository, RestObjectStorage,
    RestPackageRepository, RestProfileRepository, RestRoleMenuRepository,
    RestUserFlowRepository, RestUserRoleRepository, RestWorkflowRepository,
};
use admin_security::{GatewayTokenVerifier, PasswordTransform};
use admin_shared::config::AppConfig;

const LIMITER_PRUNE_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (.env included)
    let config = AppConfig::load().context("failed to load configuration")?;

    // Initialize telemetry; the guard flushes the log file on exit
    let _log_guard = admin_shared::telemetry::init_telemetry(&config.telemetry)?;

    info!("{} starting ({})", config.app.name, config.app.env);

    let state = build_state(config.clone())?;
    spawn_background_tasks(&state);

    let app = build_router(state);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn build_state(config: AppConfig) -> anyhow::Result<AppState> {
    let client = GatewayClient::new(&config.gateway)?;
    info!("Gateway: {}", client.base_url());

    let password_transform = PasswordTransform::from_flag(config.auth.legacy_password_digest);
    if password_transform.is_legacy() {
        warn!("auth.legacy_password_digest is enabled: passwords are sent as SHA-256 digests");
    }

    let verifier = config
        .gateway
        .jwt_secret
        .as_deref()
        .filter(|secret| !secret.trim().is_empty())
        .map(|secret| GatewayTokenVerifier::new(secret, &config.gateway.jwt_audience));
    if verifier.is_none() {
        info!("No gateway JWT secret configured, access tokens are checked with the auth provider");
    }

    let retry = RetryPolicy::from_settings(&config.saga);

    // Adapters
    let menus = Arc::new(RestMenuRepository::new(client.clone()));
    let grants = Arc::new(RestRoleMenuRepository::new(client.clone()));
    let roles = Arc::new(RestUserRoleRepository::new(client.clone()));
    let profiles = Arc::new(RestProfileRepository::new(client.clone()));
    let packages = Arc::new(RestPackageRepository::new(client.clone()));
    let workflows = Arc::new(RestWorkflowRepository::new(client.clone()));
    let flows = Arc::new(RestUserFlowRepository::new(client.clone()));
    let storage = Arc::new(RestObjectStorage::new(client.clone()));
    let provider = Arc::new(RestAuthProvider::new(
        client,
        config.auth.email_redirect_to.clone(),
    ));

    // Services
    Ok(AppState {
        auth: Arc::new(AuthService::new(
            provider.clone(),
            roles.clone(),
            profiles.clone(),
            verifier,
            password_transform,
        )),
        access: Arc::new(AccessResolver::new(menus.clone(), grants.clone())),
        permissions: Arc::new(PermissionService::new(menus.clone(), grants, retry)),
        menus: Arc::new(MenuService::new(menus)),
        users: Arc::new(UserService::new(
            profiles.clone(),
            roles,
            provider,
            password_transform,
        )),
        packages: Arc::new(PackageService::new(
            packages.clone(),
            storage.clone(),
            config.storage.packages_bucket.clone(),
            config.storage.signed_url_ttl_seconds,
            retry,
        )),
        workflows: Arc::new(WorkflowService::new(
            workflows.clone(),
            storage,
            config.storage.workflows_bucket.clone(),
            retry,
        )),
        user_flows: Arc::new(UserFlowService::new(flows)),
        dashboard: Arc::new(DashboardService::new(profiles, packages, workflows)),
        sign_in_limiter: Arc::new(SignInLimiter::per_minute(config.auth.sign_in_per_minute)),
        config: Arc::new(config),
    })
}

fn spawn_background_tasks(state: &AppState) {
    let limiter = state.sign_in_limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(LIMITER_PRUNE_INTERVAL);
        loop {
            interval.tick().await;
            limiter.prune();
        }
    });

    let mut events = state.auth.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => debug!("Auth event: {:?}", event),
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("Auth event log skipped {} events", skipped);
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
