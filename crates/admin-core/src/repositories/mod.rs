//! Repository traits (ports)

pub mod menu_repository;
pub mod role_menu_repository;
pub mod user_role_repository;
pub mod profile_repository;
pub mod package_repository;
pub mod workflow_repository;
pub mod user_flow_repository;
pub mod object_storage;
pub mod auth_provider;

pub use menu_repository::MenuRepository;
pub use role_menu_repository::RoleMenuRepository;
pub use user_role_repository::UserRoleRepository;
pub use profile_repository::ProfileRepository;
pub use package_repository::PackageRepository;
pub use workflow_repository::WorkflowRepository;
pub use user_flow_repository::UserFlowRepository;
pub use object_storage::ObjectStorage;
pub use auth_provider::AuthProvider;

#[cfg(test)]
pub use menu_repository::MockMenuRepository;
#[cfg(test)]
pub use role_menu_repository::MockRoleMenuRepository;
#[cfg(test)]
pub use user_role_repository::MockUserRoleRepository;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
#[cfg(test)]
pub use package_repository::MockPackageRepository;
#[cfg(test)]
pub use workflow_repository::MockWorkflowRepository;
#[cfg(test)]
pub use user_flow_repository::MockUserFlowRepository;
#[cfg(test)]
pub use object_storage::MockObjectStorage;
#[cfg(test)]
pub use auth_provider::MockAuthProvider;
