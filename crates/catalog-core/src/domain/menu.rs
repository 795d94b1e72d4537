// ============================================================================
// Catalog Core - Menu Entity
// File: crates/catalog-core/src/domain/menu.rs
// Description: Top level of the catalog hierarchy
// ============================================================================

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Menu as read from the store. Counts are derived from live children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub submenus_count: i64,
    pub dishes_count: i64,
}

/// Writable menu fields (create and patch payload).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct MenuFields {
    #[validate(length(min = 1, max = 50, message = "Menu title must be between 1 and 50 characters"))]
    pub title: String,

    #[validate(length(max = 200, message = "Menu description too long"))]
    pub description: String,
}

impl MenuFields {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}
