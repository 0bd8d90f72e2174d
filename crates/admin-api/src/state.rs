use std::sync::Arc;

use admin_core::services::{
    AccessResolver, AuthService, DashboardService, MenuService, PackageService,
    PermissionService, UserFlowService, UserService, WorkflowService,
};
use admin_shared::config::AppConfig;

use crate::middleware::SignInLimiter;

/// Service graph shared by every request. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth: Arc<AuthService>,
    pub access: Arc<AccessResolver>,
    pub permissions: Arc<PermissionService>,
    pub menus: Arc<MenuService>,
    pub users: Arc<UserService>,
    pub packages: Arc<PackageService>,
    pub workflows: Arc<WorkflowService>,
    pub user_flows: Arc<UserFlowService>,
    pub dashboard: Arc<DashboardService>,
    pub sign_in_limiter: Arc<SignInLimiter>,
}
