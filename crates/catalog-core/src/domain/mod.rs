//! # Catalog Core - Domain Module
//! 
//! Entities of the Menu → Submenu → Dish hierarchy, their identifier chains and
//! the per-kind strategy binding them to storage and cache.

pub mod menu;
pub mod submenu;
pub mod dish;
pub mod price;
pub mod scope;
pub mod kind;
pub mod catalog;

// Re-export all entities and scopes
pub use menu::{Menu, MenuFields};
pub use submenu::{Submenu, SubmenuFields};
pub use dish::{Dish, DishFields};
pub use price::normalize_price;
pub use scope::{CatalogRoot, MenuScope, SubmenuScope, DishScope};
pub use kind::{EntityKind, MenuKind, SubmenuKind, DishKind};
pub use catalog::{MenuNode, SubmenuNode};
