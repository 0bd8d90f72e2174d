//! User-flow repository trait (port)

use async_trait::async_trait;

use admin_shared::types::Page;

use crate::domain::{UserFlow, UserFlowQuery};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserFlowRepository: Send + Sync {
    /// One page of matching flows, newest first, with the exact total count
    async fn search(&self, query: &UserFlowQuery) -> Result<Page<UserFlow>, DomainError>;
}
