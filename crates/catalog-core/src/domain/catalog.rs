//! Nested read model returned by the full-tree query.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Dish;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub submenus: Vec<SubmenuNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmenuNode {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub dishes: Vec<Dish>,
}

impl MenuNode {
    pub fn submenus_count(&self) -> usize {
        self.submenus.len()
    }

    pub fn dishes_count(&self) -> usize {
        self.submenus.iter().map(|s| s.dishes.len()).sum()
    }
}
