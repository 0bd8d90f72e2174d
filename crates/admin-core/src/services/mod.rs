//! Application services

pub mod access_resolver;
pub mod permission_service;
pub mod menu_service;
pub mod user_service;
pub mod package_service;
pub mod workflow_service;
pub mod user_flow_service;
pub mod auth_service;
pub mod dashboard_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use access_resolver::AccessResolver;
pub use permission_service::PermissionService;
pub use menu_service::MenuService;
pub use user_service::UserService;
pub use package_service::PackageService;
pub use workflow_service::WorkflowService;
pub use user_flow_service::UserFlowService;
pub use auth_service::AuthService;
pub use dashboard_service::{DashboardService, DashboardSummary};
