//! Role-menu editor
//!
//! Saving is a full replace: delete every grant of the role, then insert the
//! new set. The gateway offers no transaction spanning both calls, so the
//! previous grants are snapshotted and restored when the insert fails.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::{Role, RoleMatrix, RoleMenu};
use crate::error::DomainError;
use crate::repositories::{MenuRepository, RoleMenuRepository};
use crate::saga::{RetryPolicy, Saga};

pub struct PermissionService {
    menus: Arc<dyn MenuRepository>,
    grants: Arc<dyn RoleMenuRepository>,
    retry: RetryPolicy,
}

impl PermissionService {
    pub fn new(
        menus: Arc<dyn MenuRepository>,
        grants: Arc<dyn RoleMenuRepository>,
        retry: RetryPolicy,
    ) -> Self {
        Self { menus, grants, retry }
    }

    /// Menus and every role's grants, read concurrently
    pub async fn load_matrix(&self) -> Result<RoleMatrix, DomainError> {
        let (menus, grants) = tokio::try_join!(self.menus.list_all(), self.grants.list_all())?;
        Ok(RoleMatrix::build(menus, grants))
    }

    pub async fn granted_menu_ids(&self, role: Role) -> Result<HashSet<Uuid>, DomainError> {
        Ok(self.grants.menu_ids_for_role(role).await?.into_iter().collect())
    }

    pub async fn save_permissions(
        &self,
        role: Role,
        menu_ids: &HashSet<Uuid>,
    ) -> Result<(), DomainError> {
        let previous = self.granted_menu_ids(role).await?;
        self.grants.delete_by_role(role).await?;

        if menu_ids.is_empty() {
            info!("Cleared all menu grants for role {}", role);
            return Ok(());
        }

        let mut saga = Saga::new("role_menus.save", self.retry);
        let snapshot = RoleMenu::for_role(role, &previous);
        let grants = self.grants.clone();
        saga.on_rollback("restore previous grants", move || {
            let grants = grants.clone();
            let snapshot = snapshot.clone();
            async move {
                grants.delete_by_role(role).await?;
                if !snapshot.is_empty() {
                    grants.insert_many(&snapshot).await?;
                }
                Ok(())
            }
        });

        match self.grants.insert_many(&RoleMenu::for_role(role, menu_ids)).await {
            Ok(()) => {
                saga.commit();
                info!("Saved {} menu grants for role {}", menu_ids.len(), role);
                Ok(())
            }
            Err(e) => saga.abort(e).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{MockMenuRepository, MockRoleMenuRepository};
    use crate::services::test_support::*;
    use mockall::predicate::eq;

    fn ids(ns: &[u128]) -> HashSet<Uuid> {
        ns.iter().copied().map(Uuid::from_u128).collect()
    }

    fn service(grants: MockRoleMenuRepository) -> PermissionService {
        PermissionService::new(
            Arc::new(MockMenuRepository::new()),
            Arc::new(grants),
            RetryPolicy::immediate(3),
        )
    }

    #[tokio::test]
    async fn test_empty_set_deletes_and_never_inserts() {
        let mut grants = MockRoleMenuRepository::new();
        grants
            .expect_menu_ids_for_role()
            .returning(|_| Ok(vec![Uuid::from_u128(1)]));
        grants
            .expect_delete_by_role()
            .with(eq(Role::User))
            .times(1)
            .returning(|_| Ok(()));
        grants.expect_insert_many().times(0);

        service(grants)
            .save_permissions(Role::User, &HashSet::new())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_save_inserts_one_row_per_id() {
        let mut grants = MockRoleMenuRepository::new();
        grants.expect_menu_ids_for_role().returning(|_| Ok(vec![]));
        grants.expect_delete_by_role().times(1).returning(|_| Ok(()));
        grants
            .expect_insert_many()
            .withf(|rows| rows.len() == 2 && rows.iter().all(|r| r.role == Role::Admin))
            .times(1)
            .returning(|_| Ok(()));

        service(grants)
            .save_permissions(Role::Admin, &ids(&[1, 2]))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_insert_failure_restores_previous_grants() {
        let previous = Uuid::from_u128(9);
        let mut grants = MockRoleMenuRepository::new();
        grants
            .expect_menu_ids_for_role()
            .returning(move |_| Ok(vec![previous]));
        // forward delete plus the compensation's delete
        grants.expect_delete_by_role().times(2).returning(|_| Ok(()));
        grants
            .expect_insert_many()
            .withf(|rows| rows.len() == 2)
            .times(1)
            .returning(|_| Err(gateway_error()));
        grants
            .expect_insert_many()
            .withf(move |rows| rows.len() == 1 && rows[0].menu_id == previous)
            .times(1)
            .returning(|_| Ok(()));

        let result = service(grants)
            .save_permissions(Role::User, &ids(&[1, 2]))
            .await;

        assert_eq!(result, Err(gateway_error()));
    }

    #[tokio::test]
    async fn test_delete_failure_stops_before_insert() {
        let mut grants = MockRoleMenuRepository::new();
        grants.expect_menu_ids_for_role().returning(|_| Ok(vec![]));
        grants.expect_delete_by_role().returning(|_| Err(gateway_error()));
        grants.expect_insert_many().times(0);

        assert!(service(grants)
            .save_permissions(Role::User, &ids(&[1]))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_load_matrix_groups_grants() {
        let mut menus = MockMenuRepository::new();
        menus
            .expect_list_all()
            .returning(|| Ok(vec![menu(2, None, 2), menu(1, None, 1)]));
        let mut grants = MockRoleMenuRepository::new();
        grants.expect_list_all().returning(|| {
            Ok(vec![
                RoleMenu::new(Role::Admin, Uuid::from_u128(1)),
                RoleMenu::new(Role::Admin, Uuid::from_u128(2)),
                RoleMenu::new(Role::User, Uuid::from_u128(1)),
            ])
        });

        let service = PermissionService::new(Arc::new(menus), Arc::new(grants), RetryPolicy::default());
        let matrix = service.load_matrix().await.unwrap();

        assert_eq!(matrix.menus[0].id, Uuid::from_u128(1));
        assert_eq!(matrix.granted(Role::Admin), ids(&[1, 2]));
        assert_eq!(matrix.granted(Role::User), ids(&[1]));
    }
}
