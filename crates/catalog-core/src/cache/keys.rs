//! Cache key layout.
//!
//! ```text
//! menus                      list of menus
//! menus:{m}                  one menu
//! submenus:{m}               submenus of a menu
//! submenus:{m}:{s}           one submenu
//! dishes:{m}:{s}             dishes of a submenu
//! dishes:{m}:{s}:{d}         one dish
//! catalog                    full nested tree
//! ```

use uuid::Uuid;

pub const MENU_LIST: &str = "menus";
pub const CATALOG: &str = "catalog";

pub fn menu(menu_id: Uuid) -> String {
    format!("menus:{}", menu_id)
}

pub fn submenu_list(menu_id: Uuid) -> String {
    format!("submenus:{}", menu_id)
}

pub fn submenu(menu_id: Uuid, submenu_id: Uuid) -> String {
    format!("submenus:{}:{}", menu_id, submenu_id)
}

pub fn dish_list(menu_id: Uuid, submenu_id: Uuid) -> String {
    format!("dishes:{}:{}", menu_id, submenu_id)
}

pub fn dish(menu_id: Uuid, submenu_id: Uuid, dish_id: Uuid) -> String {
    format!("dishes:{}:{}:{}", menu_id, submenu_id, dish_id)
}

/// Every submenu key (list and single) under a menu.
pub fn submenus_under_menu(menu_id: Uuid) -> String {
    format!("submenus:{}*", menu_id)
}

/// Every dish key under a menu.
pub fn dishes_under_menu(menu_id: Uuid) -> String {
    format!("dishes:{}*", menu_id)
}

/// Every dish key (list and single) under a submenu.
pub fn dishes_under_submenu(menu_id: Uuid, submenu_id: Uuid) -> String {
    format!("dishes:{}:{}*", menu_id, submenu_id)
}
