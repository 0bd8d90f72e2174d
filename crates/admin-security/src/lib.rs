//! # Admin Security
//! 
//! Security utilities: gateway token verification and credential transforms.

pub mod jwt;
pub mod credentials;

pub use jwt::{GatewayTokenVerifier, JwtError, VerifiedToken};
pub use credentials::{CredentialError, PasswordTransform};
