//! Identifier chains addressing one entity (or one collection) in the hierarchy.

use uuid::Uuid;

/// Parent of the menu collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CatalogRoot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuScope {
    pub menu_id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmenuScope {
    pub menu_id: Uuid,
    pub submenu_id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DishScope {
    pub menu_id: Uuid,
    pub submenu_id: Uuid,
    pub dish_id: Uuid,
}

impl MenuScope {
    pub fn new(menu_id: Uuid) -> Self {
        Self { menu_id }
    }

    pub fn submenu(self, submenu_id: Uuid) -> SubmenuScope {
        SubmenuScope {
            menu_id: self.menu_id,
            submenu_id,
        }
    }
}

impl SubmenuScope {
    pub fn new(menu_id: Uuid, submenu_id: Uuid) -> Self {
        Self { menu_id, submenu_id }
    }

    pub fn menu(self) -> MenuScope {
        MenuScope::new(self.menu_id)
    }

    pub fn dish(self, dish_id: Uuid) -> DishScope {
        DishScope {
            menu_id: self.menu_id,
            submenu_id: self.submenu_id,
            dish_id,
        }
    }
}

impl DishScope {
    pub fn new(menu_id: Uuid, submenu_id: Uuid, dish_id: Uuid) -> Self {
        Self {
            menu_id,
            submenu_id,
            dish_id,
        }
    }

    pub fn submenu(self) -> SubmenuScope {
        SubmenuScope::new(self.menu_id, self.submenu_id)
    }
}
