// ============================================================================
// Admin Infrastructure - REST User Flow Repository
// File: crates/admin-infrastructure/src/rest/user_flow_repo_impl.rs
// ============================================================================

use async_trait::async_trait;

use admin_core::domain::{UserFlow, UserFlowQuery};
use admin_core::error::DomainError;
use admin_core::repositories::UserFlowRepository;
use admin_shared::constants::TABLE_USER_FLOWS;
use admin_shared::types::Page;

use crate::gateway::{GatewayClient, TableQuery};

pub struct RestUserFlowRepository {
    client: GatewayClient,
}

impl RestUserFlowRepository {
    pub fn new(client: GatewayClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserFlowRepository for RestUserFlowRepository {
    async fn search(&self, query: &UserFlowQuery) -> Result<Page<UserFlow>, DomainError> {
        let mut filter = TableQuery::all();
        if let Some(flow_id) = &query.flow_id {
            filter = filter.eq("flow_id", flow_id);
        }
        if let Some(term) = query.name_term() {
            filter = filter.ilike("flow_name", &term);
        }
        let filter = filter.order("created_at", false);

        let (from, to) = query.pagination.range();
        let (rows, total): (Vec<UserFlow>, u64) = self
            .client
            .table(TABLE_USER_FLOWS)
            .select_range(&filter, from, to)
            .await?;

        Ok(Page::new(rows, total, query.pagination))
    }
}
