//! # Admin Infrastructure
//! 
//! Adapters for the hosted backend: REST tables, object storage and auth.

pub mod error;
pub mod gateway;
pub mod rest;
pub mod storage;
pub mod auth;

pub use error::GatewayError;
pub use gateway::{GatewayClient, TableQuery};
pub use rest::{
    RestMenuRepository, RestPackageRepository, RestProfileRepository, RestRoleMenuRepository,
    RestUserFlowRepository, RestUserRoleRepository, RestWorkflowRepository,
};
pub use storage::RestObjectStorage;
pub use auth::RestAuthProvider;
