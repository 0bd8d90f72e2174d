//! # Admin Core
//! 
//! Domain entities, services, and repository traits for the admin console.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod saga;
pub mod session;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
pub use session::{RouteDecision, RouteGuard, SessionContext};
