//! Navigation tree construction
//!
//! Permission filtering happens per menu id, not per subtree. A granted menu
//! whose parent is missing, hidden or not granted is promoted to a root so it
//! stays reachable.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use uuid::Uuid;

use super::icon::MenuIcon;
use super::menu::Menu;

/// Menu with its accessible children, built fresh on every resolve
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MenuNode {
    pub id: Uuid,
    pub name: String,
    pub path: Option<String>,
    pub icon: Option<String>,
    pub glyph: &'static str,
    pub parent_id: Option<Uuid>,
    pub sort_order: i32,
    pub is_visible: bool,
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    fn leaf(menu: &Menu) -> Self {
        Self {
            id: menu.id,
            name: menu.name.clone(),
            path: menu.path.clone(),
            icon: menu.icon.clone(),
            glyph: MenuIcon::resolve(menu.icon.as_deref()).glyph(),
            parent_id: menu.parent_id,
            sort_order: menu.sort_order,
            is_visible: menu.is_visible,
            children: Vec::new(),
        }
    }
}

/// Visible menus granted to a role, stable-sorted by `sort_order`
pub fn accessible_menus(menus: &[Menu], grants: &HashSet<Uuid>) -> Vec<Menu> {
    let mut accessible: Vec<Menu> = menus
        .iter()
        .filter(|m| m.is_visible && grants.contains(&m.id))
        .cloned()
        .collect();
    accessible.sort_by_key(|m| m.sort_order);
    accessible
}

/// Build a forest from a flat menu list in a single scan.
///
/// Children keep input order. True roots come first in the order they are
/// met, followed by promoted orphans in the order they are met. Menus on a
/// parent cycle are not reachable from any root and are left out.
pub fn build_menu_tree(menus: &[Menu]) -> Vec<MenuNode> {
    let mut index: HashMap<Uuid, usize> = HashMap::with_capacity(menus.len());
    for (i, menu) in menus.iter().enumerate() {
        index.entry(menu.id).or_insert(i);
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); menus.len()];
    let mut roots: Vec<usize> = Vec::new();
    let mut orphans: Vec<usize> = Vec::new();

    for (i, menu) in menus.iter().enumerate() {
        // duplicate id
        if index.get(&menu.id) != Some(&i) {
            continue;
        }
        match menu.parent_id {
            None => roots.push(i),
            Some(parent) => match index.get(&parent) {
                Some(&parent) => children[parent].push(i),
                None => orphans.push(i),
            },
        }
    }

    roots
        .into_iter()
        .chain(orphans)
        .map(|i| materialize(i, menus, &children))
        .collect()
}

fn materialize(i: usize, menus: &[Menu], children: &[Vec<usize>]) -> MenuNode {
    let mut node = MenuNode::leaf(&menus[i]);
    node.children = children[i]
        .iter()
        .map(|&child| materialize(child, menus, children))
        .collect();
    node
}
