//! Access control resolver: the navigation tree a role may see

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, error};
use uuid::Uuid;

use crate::domain::{accessible_menus, build_menu_tree, MenuNode, Role};
use crate::error::DomainError;
use crate::repositories::{MenuRepository, RoleMenuRepository};

pub struct AccessResolver {
    menus: Arc<dyn MenuRepository>,
    grants: Arc<dyn RoleMenuRepository>,
}

impl AccessResolver {
    pub fn new(menus: Arc<dyn MenuRepository>, grants: Arc<dyn RoleMenuRepository>) -> Self {
        Self { menus, grants }
    }

    /// Navigation forest for `role` (`user` when unset).
    ///
    /// Fails closed: any fetch error yields an empty forest.
    pub async fn resolve(&self, role: Option<Role>) -> Vec<MenuNode> {
        let role = role.unwrap_or(Role::User);
        match self.try_resolve(role).await {
            Ok(forest) => forest,
            Err(e) => {
                error!("Failed to resolve menus for role {}: {}", role, e);
                Vec::new()
            }
        }
    }

    async fn try_resolve(&self, role: Role) -> Result<Vec<MenuNode>, DomainError> {
        let granted: HashSet<Uuid> = self
            .grants
            .menu_ids_for_role(role)
            .await?
            .into_iter()
            .collect();
        if granted.is_empty() {
            debug!("Role {} has no menu grants", role);
            return Ok(Vec::new());
        }

        let menus = self.menus.list_visible().await?;
        let forest = build_menu_tree(&accessible_menus(&menus, &granted));
        debug!("Resolved {} root menus for role {}", forest.len(), role);
        Ok(forest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{MockMenuRepository, MockRoleMenuRepository};
    use crate::services::test_support::*;
    use mockall::predicate::eq;

    fn resolver(menus: MockMenuRepository, grants: MockRoleMenuRepository) -> AccessResolver {
        AccessResolver::new(Arc::new(menus), Arc::new(grants))
    }

    #[tokio::test]
    async fn test_resolve_promotes_orphan() {
        let mut menus = MockMenuRepository::new();
        menus.expect_list_visible().times(1).returning(|| {
            Ok(vec![menu(1, None, 1), menu(2, Some(1), 2), menu(3, Some(2), 3)])
        });
        let mut grants = MockRoleMenuRepository::new();
        grants
            .expect_menu_ids_for_role()
            .with(eq(Role::User))
            .returning(|_| Ok(vec![Uuid::from_u128(2), Uuid::from_u128(3), Uuid::from_u128(3)]));

        let forest = resolver(menus, grants).resolve(Some(Role::User)).await;

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].id, Uuid::from_u128(2));
        assert_eq!(forest[0].children[0].id, Uuid::from_u128(3));
    }

    #[tokio::test]
    async fn test_unset_role_resolves_as_user() {
        let menus = MockMenuRepository::new();
        let mut grants = MockRoleMenuRepository::new();
        grants
            .expect_menu_ids_for_role()
            .with(eq(Role::User))
            .times(1)
            .returning(|_| Ok(vec![]));

        assert!(resolver(menus, grants).resolve(None).await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_yields_empty_navigation() {
        let mut menus = MockMenuRepository::new();
        menus.expect_list_visible().returning(|| Err(gateway_error()));
        let mut grants = MockRoleMenuRepository::new();
        grants
            .expect_menu_ids_for_role()
            .returning(|_| Ok(vec![Uuid::from_u128(1)]));

        assert!(resolver(menus, grants).resolve(Some(Role::Admin)).await.is_empty());
    }

    #[tokio::test]
    async fn test_grant_failure_yields_empty_navigation() {
        let menus = MockMenuRepository::new();
        let mut grants = MockRoleMenuRepository::new();
        grants.expect_menu_ids_for_role().returning(|_| Err(gateway_error()));

        assert!(resolver(menus, grants).resolve(Some(Role::Admin)).await.is_empty());
    }
}
