// ============================================================================
// Catalog Core - Submenu Entity
// File: crates/catalog-core/src/domain/submenu.rs
// ============================================================================

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submenu {
    pub id: Uuid,
    pub menu_id: Uuid,
    pub title: String,
    pub description: String,
    pub dishes_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SubmenuFields {
    #[validate(length(min = 1, max = 50, message = "Submenu title must be between 1 and 50 characters"))]
    pub title: String,

    #[validate(length(max = 200, message = "Submenu description too long"))]
    pub description: String,
}

impl SubmenuFields {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}
