//! Menu icon capability
//!
//! Menus store a free-form icon tag. Only known tags map to a glyph; anything
//! else renders as the generic menu glyph.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MenuIcon {
    LayoutDashboard,
    Settings,
    Users,
    Shield,
    #[default]
    Menu,
    Package,
    Workflow,
    FolderOpen,
}

impl MenuIcon {
    pub const ALL: [MenuIcon; 8] = [
        MenuIcon::LayoutDashboard,
        MenuIcon::Settings,
        MenuIcon::Users,
        MenuIcon::Shield,
        MenuIcon::Menu,
        MenuIcon::Package,
        MenuIcon::Workflow,
        MenuIcon::FolderOpen,
    ];

    /// Tag as stored in `menus.icon`
    pub fn tag(&self) -> &'static str {
        match self {
            MenuIcon::LayoutDashboard => "LayoutDashboard",
            MenuIcon::Settings => "Settings",
            MenuIcon::Users => "Users",
            MenuIcon::Shield => "Shield",
            MenuIcon::Menu => "Menu",
            MenuIcon::Package => "Package",
            MenuIcon::Workflow => "Workflow",
            MenuIcon::FolderOpen => "FolderOpen",
        }
    }

    /// Glyph name the UI renders
    pub fn glyph(&self) -> &'static str {
        match self {
            MenuIcon::LayoutDashboard => "layout-dashboard",
            MenuIcon::Settings => "settings",
            MenuIcon::Users => "users",
            MenuIcon::Shield => "shield",
            MenuIcon::Menu => "menu",
            MenuIcon::Package => "package",
            MenuIcon::Workflow => "workflow",
            MenuIcon::FolderOpen => "folder-open",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|icon| icon.tag() == tag.trim())
    }

    /// Resolve a stored tag, falling back to `Menu` for unknown or missing tags
    pub fn resolve(tag: Option<&str>) -> Self {
        tag.and_then(Self::from_tag).unwrap_or_default()
    }

    /// Tags offered by the menu editor
    pub fn options() -> Vec<&'static str> {
        Self::ALL.iter().map(|icon| icon.tag()).collect()
    }
}
