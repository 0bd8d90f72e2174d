//! Dashboard summary

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::domain::Role;
use crate::error::DomainError;
use crate::repositories::{PackageRepository, ProfileRepository, WorkflowRepository};
use crate::session::SessionContext;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardSummary {
    pub username: Option<String>,
    pub role: Role,
    /// `None` when the count could not be fetched
    pub users: Option<u64>,
    pub packages: Option<u64>,
    pub workflows: Option<u64>,
    pub roles: usize,
}

pub struct DashboardService {
    profiles: Arc<dyn ProfileRepository>,
    packages: Arc<dyn PackageRepository>,
    workflows: Arc<dyn WorkflowRepository>,
}

fn count_or_none(entity: &str, result: Result<u64, DomainError>) -> Option<u64> {
    result
        .map_err(|e| warn!("Failed to count {}: {}", entity, e))
        .ok()
}

impl DashboardService {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        packages: Arc<dyn PackageRepository>,
        workflows: Arc<dyn WorkflowRepository>,
    ) -> Self {
        Self {
            profiles,
            packages,
            workflows,
        }
    }

    pub async fn summary(&self, session: &SessionContext) -> DashboardSummary {
        let (users, packages, workflows) = tokio::join!(
            self.profiles.count(),
            self.packages.count(),
            self.workflows.count()
        );

        DashboardSummary {
            username: session.display_name().map(String::from),
            role: session.effective_role(),
            users: count_or_none("profiles", users),
            packages: count_or_none("packages", packages),
            workflows: count_or_none("workflows", workflows),
            roles: Role::ALL.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AuthUser;
    use crate::repositories::{MockPackageRepository, MockProfileRepository, MockWorkflowRepository};
    use crate::services::test_support::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_failed_count_renders_as_none() {
        let mut profiles = MockProfileRepository::new();
        profiles.expect_count().returning(|| Ok(12));
        let mut packages = MockPackageRepository::new();
        packages.expect_count().returning(|| Err(gateway_error()));
        let mut workflows = MockWorkflowRepository::new();
        workflows.expect_count().returning(|| Ok(4));

        let service = DashboardService::new(Arc::new(profiles), Arc::new(packages), Arc::new(workflows));
        let session = SessionContext {
            user: Some(AuthUser {
                id: Uuid::new_v4(),
                email: Some("ops@example.com".to_string()),
            }),
            role: Some(Role::Admin),
            profile: None,
        };

        let summary = service.summary(&session).await;

        assert_eq!(summary.users, Some(12));
        assert_eq!(summary.packages, None);
        assert_eq!(summary.workflows, Some(4));
        assert_eq!(summary.roles, 2);
        assert_eq!(summary.role, Role::Admin);
        assert_eq!(summary.username.as_deref(), Some("ops@example.com"));
    }
}
