// ============================================================================
// Admin Core - User Flow Entity
// File: crates/admin-core/src/domain/user_flow.rs
// Description: Read-only flow records reported by desktop clients
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use admin_shared::types::Pagination;
use admin_shared::utils::non_blank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Windows,
    Mac,
    Linux,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum FlowStatus {
    #[default]
    Init,
    Analyzed,
    Superseded,
}

/// User flow entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserFlow {
    pub id: Uuid,
    pub flow_id: String,
    pub user_id: String,
    pub flow_name: String,
    pub flow_description: Option<String>,
    pub client_version: Option<String>,
    pub platform: Platform,
    pub package_hash: Option<String>,
    pub package_size: Option<u64>,
    pub package_url: Option<String>,
    pub status: FlowStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Server-side search over `user_flows`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFlowQuery {
    /// Exact match on `flow_id`
    pub flow_id: Option<String>,
    /// Case-insensitive substring match on `flow_name`
    pub flow_name: Option<String>,
    pub pagination: Pagination,
}

impl UserFlowQuery {
    pub fn new(flow_id: Option<String>, flow_name: Option<String>, page: u64) -> Self {
        Self {
            flow_id: non_blank(flow_id),
            flow_name: non_blank(flow_name),
            pagination: Pagination::new(page),
        }
    }

    /// Name term with wildcard characters removed, `None` when nothing is left
    pub fn name_term(&self) -> Option<String> {
        self.flow_name
            .as_deref()
            .map(|name| name.replace(['*', '%'], ""))
            .filter(|name| !name.trim().is_empty())
    }
}
