// ============================================================================
// Admin Core - Role Menu Entity
// File: crates/admin-core/src/domain/role_menu.rs
// Description: Grants of menus to roles and the role permission matrix
// ============================================================================

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::menu::Menu;
use super::role::Role;

/// Row of `role_menus`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleMenu {
    pub role: Role,
    pub menu_id: Uuid,
}

impl RoleMenu {
    pub fn new(role: Role, menu_id: Uuid) -> Self {
        Self { role, menu_id }
    }

    /// One grant per distinct id, in a stable order
    pub fn for_role(role: Role, menu_ids: &HashSet<Uuid>) -> Vec<RoleMenu> {
        let mut ids: Vec<Uuid> = menu_ids.iter().copied().collect();
        ids.sort();
        ids.into_iter().map(|id| RoleMenu::new(role, id)).collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleDescriptor {
    pub role: Role,
    pub label: &'static str,
    pub description: &'static str,
    pub menu_count: usize,
}

/// Everything the role permission screen shows at once
#[derive(Debug, Clone, Serialize)]
pub struct RoleMatrix {
    pub roles: Vec<RoleDescriptor>,
    pub menus: Vec<Menu>,
    pub grants: HashMap<Role, HashSet<Uuid>>,
}

impl RoleMatrix {
    pub fn build(mut menus: Vec<Menu>, grants: Vec<RoleMenu>) -> Self {
        menus.sort_by_key(|m| m.sort_order);

        let mut by_role: HashMap<Role, HashSet<Uuid>> =
            Role::ALL.iter().map(|r| (*r, HashSet::new())).collect();
        for grant in grants {
            by_role.entry(grant.role).or_default().insert(grant.menu_id);
        }

        let roles = Role::ALL
            .iter()
            .map(|role| RoleDescriptor {
                role: *role,
                label: role.label(),
                description: role.description(),
                menu_count: by_role.get(role).map_or(0, HashSet::len),
            })
            .collect();

        Self {
            roles,
            menus,
            grants: by_role,
        }
    }

    pub fn granted(&self, role: Role) -> HashSet<Uuid> {
        self.grants.get(&role).cloned().unwrap_or_default()
    }
}
