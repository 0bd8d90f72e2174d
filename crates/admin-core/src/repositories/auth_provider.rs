//! Auth provider port

use async_trait::async_trait;

use crate::domain::{AuthSession, AuthUser, SignUpAttributes, SignUpOutcome};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, DomainError>;

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        attributes: &SignUpAttributes,
    ) -> Result<SignUpOutcome, DomainError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), DomainError>;

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, DomainError>;

    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, DomainError>;
}
