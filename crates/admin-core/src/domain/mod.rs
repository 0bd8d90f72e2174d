//! Domain entities

pub mod role;
pub mod icon;
pub mod menu;
pub mod menu_tree;
pub mod role_menu;
pub mod user;
pub mod package;
pub mod workflow;
pub mod user_flow;
pub mod upload;
pub mod auth;

pub use role::{Role, UserRole};
pub use icon::MenuIcon;
pub use menu::{Menu, MenuDraft};
pub use menu_tree::{accessible_menus, build_menu_tree, MenuNode};
pub use role_menu::{RoleDescriptor, RoleMatrix, RoleMenu};
pub use user::{NewUser, Profile, ProfilePatch, ProfileStatus, UserSummary, UserUpdate};
pub use package::{NewPackage, Package, PackageDownload, PackageForm, PackagePatch};
pub use workflow::{NewWorkflow, PublicWorkflow, Workflow, WorkflowForm, WorkflowPatch};
pub use user_flow::{FlowStatus, Platform, UserFlow, UserFlowQuery};
pub use upload::{FilePolicy, MediaKind, PreparedUpload, UploadFile};
pub use auth::{AuthEvent, AuthSession, AuthUser, SignInForm, SignUpAttributes, SignUpForm, SignUpOutcome};
