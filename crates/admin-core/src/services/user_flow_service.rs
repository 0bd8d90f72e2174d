//! Server-side user-flow search

use std::sync::Arc;

use tracing::debug;

use admin_shared::types::Page;

use crate::domain::{UserFlow, UserFlowQuery};
use crate::error::DomainError;
use crate::repositories::UserFlowRepository;

pub struct UserFlowService {
    flows: Arc<dyn UserFlowRepository>,
}

impl UserFlowService {
    pub fn new(flows: Arc<dyn UserFlowRepository>) -> Self {
        Self { flows }
    }

    pub async fn search(&self, query: UserFlowQuery) -> Result<Page<UserFlow>, DomainError> {
        let (from, to) = query.pagination.range();
        debug!(
            flow_id = ?query.flow_id,
            flow_name = ?query.flow_name,
            from,
            to,
            "Searching user flows"
        );
        self.flows.search(&query).await
    }
}
