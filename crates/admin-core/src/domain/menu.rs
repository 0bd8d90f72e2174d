// ============================================================================
// Admin Core - Menu Entity
// File: crates/admin-core/src/domain/menu.rs
// Description: Navigation entry, optionally nested under a parent menu
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use admin_shared::utils::non_blank;

/// Menu entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Menu {
    pub id: Uuid,
    pub name: String,
    pub path: Option<String>,
    pub icon: Option<String>,
    pub parent_id: Option<Uuid>,
    pub sort_order: i32,
    pub is_visible: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl Menu {
    pub fn is_root_menu(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Create/update form for a menu
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuDraft {
    #[validate(length(min = 1, max = 100, message = "Menu name is required"))]
    pub name: String,

    #[validate(length(max = 255, message = "Menu path too long"))]
    pub path: Option<String>,

    #[validate(length(max = 100, message = "Menu icon too long"))]
    pub icon: Option<String>,

    pub parent_id: Option<Uuid>,

    #[serde(default)]
    pub sort_order: i32,

    #[serde(default = "default_visible")]
    pub is_visible: bool,
}

fn default_visible() -> bool {
    true
}

impl MenuDraft {
    /// Trim text fields, turn blank optionals into `None`, then validate
    pub fn normalized(self) -> Result<Self, validator::ValidationErrors> {
        let draft = Self {
            name: self.name.trim().to_string(),
            path: non_blank(self.path),
            icon: non_blank(self.icon),
            parent_id: self.parent_id,
            sort_order: self.sort_order,
            is_visible: self.is_visible,
        };

        draft.validate()?;
        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> MenuDraft {
        MenuDraft {
            name: name.to_string(),
            path: Some("  ".to_string()),
            icon: Some(" Users ".to_string()),
            parent_id: None,
            sort_order: 3,
            is_visible: true,
        }
    }

    #[test]
    fn test_normalize_blank_optionals() {
        let draft = draft(" Users ").normalized().unwrap();
        assert_eq!(draft.name, "Users");
        assert_eq!(draft.path, None);
        assert_eq!(draft.icon.as_deref(), Some("Users"));
    }

    #[test]
    fn test_name_required() {
        assert!(draft("   ").normalized().is_err());
    }
}
