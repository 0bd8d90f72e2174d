//! Table repositories over the PostgREST endpoint

pub mod menu_repo_impl;
pub mod role_menu_repo_impl;
pub mod user_role_repo_impl;
pub mod profile_repo_impl;
pub mod package_repo_impl;
pub mod workflow_repo_impl;
pub mod user_flow_repo_impl;

pub use menu_repo_impl::RestMenuRepository;
pub use role_menu_repo_impl::RestRoleMenuRepository;
pub use user_role_repo_impl::RestUserRoleRepository;
pub use profile_repo_impl::RestProfileRepository;
pub use package_repo_impl::RestPackageRepository;
pub use workflow_repo_impl::RestWorkflowRepository;
pub use user_flow_repo_impl::RestUserFlowRepository;
