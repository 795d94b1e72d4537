// ============================================================================
// Catalog Infrastructure - In-Memory Catalog Store
// File: crates/catalog-infrastructure/src/memory/store.rs
// ============================================================================
//! Every repository port over three id-ordered tables behind one lock, so a
//! cascade is as atomic as it is in PostgreSQL. Counts are computed on read.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use uuid::Uuid;

use catalog_core::domain::{
    normalize_price, CatalogRoot, Dish, DishFields, DishKind, DishScope, Menu, MenuFields, MenuKind,
    MenuNode, MenuScope, Submenu, SubmenuFields, SubmenuKind, SubmenuNode, SubmenuScope,
};
use catalog_core::error::DomainError;
use catalog_shared::new_id;
use catalog_core::repositories::{CatalogRepository, Repository};

struct MenuRow {
    title: String,
    description: String,
}

struct SubmenuRow {
    menu_id: Uuid,
    title: String,
    description: String,
}

struct DishRow {
    submenu_id: Uuid,
    title: String,
    description: String,
    price: Decimal,
}

#[derive(Default)]
struct Tables {
    menus: BTreeMap<Uuid, MenuRow>,
    submenus: BTreeMap<Uuid, SubmenuRow>,
    dishes: BTreeMap<Uuid, DishRow>,
}

impl Tables {
    fn submenu_ids_of(&self, menu_id: Uuid) -> Vec<Uuid> {
        self.submenus
            .iter()
            .filter(|(_, s)| s.menu_id == menu_id)
            .map(|(id, _)| *id)
            .collect()
    }

    fn dishes_of(&self, submenu_id: Uuid) -> impl Iterator<Item = (&Uuid, &DishRow)> {
        self.dishes.iter().filter(move |(_, d)| d.submenu_id == submenu_id)
    }

    fn submenu_in(&self, scope: SubmenuScope) -> Option<&SubmenuRow> {
        self.submenus
            .get(&scope.submenu_id)
            .filter(|s| s.menu_id == scope.menu_id)
    }

    fn menu(&self, id: Uuid) -> Option<Menu> {
        let row = self.menus.get(&id)?;
        let submenu_ids = self.submenu_ids_of(id);
        let dishes_count = submenu_ids.iter().map(|s| self.dishes_of(*s).count()).sum::<usize>();

        Some(Menu {
            id,
            title: row.title.clone(),
            description: row.description.clone(),
            submenus_count: submenu_ids.len() as i64,
            dishes_count: dishes_count as i64,
        })
    }

    fn submenu(&self, id: Uuid) -> Option<Submenu> {
        let row = self.submenus.get(&id)?;
        Some(Submenu {
            id,
            menu_id: row.menu_id,
            title: row.title.clone(),
            description: row.description.clone(),
            dishes_count: self.dishes_of(id).count() as i64,
        })
    }

    fn dish(id: Uuid, row: &DishRow) -> Dish {
        Dish {
            id,
            submenu_id: row.submenu_id,
            title: row.title.clone(),
            description: row.description.clone(),
            price: row.price,
        }
    }

    fn remove_submenu(&mut self, submenu_id: Uuid) {
        self.submenus.remove(&submenu_id);
        self.dishes.retain(|_, d| d.submenu_id != submenu_id);
    }
}

fn conflict(kind: &str, id: Uuid) -> DomainError {
    DomainError::Conflict(format!("{} {} already exists", kind, id))
}

#[derive(Default)]
pub struct MemoryCatalogStore {
    tables: RwLock<Tables>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<MenuKind> for MemoryCatalogStore {
    async fn get(&self, scope: MenuScope) -> Result<Option<Menu>, DomainError> {
        Ok(self.tables.read().menu(scope.menu_id))
    }

    async fn list(&self, _parent: CatalogRoot) -> Result<Vec<Menu>, DomainError> {
        let tables = self.tables.read();
        Ok(tables.menus.keys().filter_map(|id| tables.menu(*id)).collect())
    }

    async fn create(&self, _parent: CatalogRoot, id: Option<Uuid>, fields: MenuFields) -> Result<Menu, DomainError> {
        let id = id.unwrap_or_else(new_id);
        let mut tables = self.tables.write();
        if tables.menus.contains_key(&id) {
            return Err(conflict("menu", id));
        }

        tables.menus.insert(
            id,
            MenuRow {
                title: fields.title,
                description: fields.description,
            },
        );
        tables
            .menu(id)
            .ok_or_else(|| DomainError::InternalError("menu vanished after insert".into()))
    }

    async fn update(&self, scope: MenuScope, fields: MenuFields) -> Result<Option<Menu>, DomainError> {
        let mut tables = self.tables.write();
        let Some(row) = tables.menus.get_mut(&scope.menu_id) else {
            return Ok(None);
        };

        row.title = fields.title;
        row.description = fields.description;
        Ok(tables.menu(scope.menu_id))
    }

    async fn delete(&self, scope: MenuScope) -> Result<bool, DomainError> {
        let mut tables = self.tables.write();
        if tables.menus.remove(&scope.menu_id).is_none() {
            return Ok(false);
        }

        for submenu_id in tables.submenu_ids_of(scope.menu_id) {
            tables.remove_submenu(submenu_id);
        }
        Ok(true)
    }
}

#[async_trait]
impl Repository<SubmenuKind> for MemoryCatalogStore {
    async fn get(&self, scope: SubmenuScope) -> Result<Option<Submenu>, DomainError> {
        let tables = self.tables.read();
        Ok(tables
            .submenu_in(scope)
            .and_then(|_| tables.submenu(scope.submenu_id)))
    }

    async fn list(&self, parent: MenuScope) -> Result<Vec<Submenu>, DomainError> {
        let tables = self.tables.read();
        Ok(tables
            .submenu_ids_of(parent.menu_id)
            .into_iter()
            .filter_map(|id| tables.submenu(id))
            .collect())
    }

    async fn create(&self, parent: MenuScope, id: Option<Uuid>, fields: SubmenuFields) -> Result<Submenu, DomainError> {
        let id = id.unwrap_or_else(new_id);
        let mut tables = self.tables.write();
        if !tables.menus.contains_key(&parent.menu_id) {
            return Err(DomainError::MenuNotFound);
        }
        if tables.submenus.contains_key(&id) {
            return Err(conflict("submenu", id));
        }

        tables.submenus.insert(
            id,
            SubmenuRow {
                menu_id: parent.menu_id,
                title: fields.title,
                description: fields.description,
            },
        );
        tables
            .submenu(id)
            .ok_or_else(|| DomainError::InternalError("submenu vanished after insert".into()))
    }

    async fn update(&self, scope: SubmenuScope, fields: SubmenuFields) -> Result<Option<Submenu>, DomainError> {
        let mut tables = self.tables.write();
        if !tables.submenus.contains_key(&scope.submenu_id) {
            return Ok(None);
        }
        if !tables.menus.contains_key(&scope.menu_id) {
            return Err(DomainError::Conflict(format!("menu {} does not exist", scope.menu_id)));
        }

        if let Some(row) = tables.submenus.get_mut(&scope.submenu_id) {
            row.menu_id = scope.menu_id;
            row.title = fields.title;
            row.description = fields.description;
        }
        Ok(tables.submenu(scope.submenu_id))
    }

    async fn delete(&self, scope: SubmenuScope) -> Result<bool, DomainError> {
        let mut tables = self.tables.write();
        if tables.submenu_in(scope).is_none() {
            return Ok(false);
        }

        tables.remove_submenu(scope.submenu_id);
        Ok(true)
    }
}

#[async_trait]
impl Repository<DishKind> for MemoryCatalogStore {
    async fn get(&self, scope: DishScope) -> Result<Option<Dish>, DomainError> {
        let tables = self.tables.read();
        if tables.submenu_in(scope.submenu()).is_none() {
            return Ok(None);
        }

        Ok(tables
            .dishes
            .get(&scope.dish_id)
            .filter(|d| d.submenu_id == scope.submenu_id)
            .map(|d| Tables::dish(scope.dish_id, d)))
    }

    async fn list(&self, parent: SubmenuScope) -> Result<Vec<Dish>, DomainError> {
        let tables = self.tables.read();
        if tables.submenu_in(parent).is_none() {
            return Ok(Vec::new());
        }

        Ok(tables
            .dishes_of(parent.submenu_id)
            .map(|(id, d)| Tables::dish(*id, d))
            .collect())
    }

    async fn create(&self, parent: SubmenuScope, id: Option<Uuid>, fields: DishFields) -> Result<Dish, DomainError> {
        let id = id.unwrap_or_else(new_id);
        let mut tables = self.tables.write();
        if tables.submenu_in(parent).is_none() {
            return Err(DomainError::SubmenuNotFound);
        }
        if tables.dishes.contains_key(&id) {
            return Err(conflict("dish", id));
        }

        let row = DishRow {
            submenu_id: parent.submenu_id,
            title: fields.title,
            description: fields.description,
            price: normalize_price(fields.price),
        };
        let dish = Tables::dish(id, &row);
        tables.dishes.insert(id, row);
        Ok(dish)
    }

    async fn update(&self, scope: DishScope, fields: DishFields) -> Result<Option<Dish>, DomainError> {
        let mut tables = self.tables.write();
        if !tables.dishes.contains_key(&scope.dish_id) {
            return Ok(None);
        }
        if !tables.submenus.contains_key(&scope.submenu_id) {
            return Err(DomainError::Conflict(format!(
                "submenu {} does not exist",
                scope.submenu_id
            )));
        }

        let Some(row) = tables.dishes.get_mut(&scope.dish_id) else {
            return Ok(None);
        };
        row.submenu_id = scope.submenu_id;
        row.title = fields.title;
        row.description = fields.description;
        row.price = normalize_price(fields.price);
        Ok(Some(Tables::dish(scope.dish_id, row)))
    }

    async fn delete(&self, scope: DishScope) -> Result<bool, DomainError> {
        let mut tables = self.tables.write();
        if tables.submenu_in(scope.submenu()).is_none() {
            return Ok(false);
        }

        let matches = tables
            .dishes
            .get(&scope.dish_id)
            .is_some_and(|d| d.submenu_id == scope.submenu_id);
        if matches {
            tables.dishes.remove(&scope.dish_id);
        }
        Ok(matches)
    }
}

#[async_trait]
impl CatalogRepository for MemoryCatalogStore {
    async fn full_tree(&self) -> Result<Vec<MenuNode>, DomainError> {
        let tables = self.tables.read();

        Ok(tables
            .menus
            .iter()
            .map(|(menu_id, menu)| MenuNode {
                id: *menu_id,
                title: menu.title.clone(),
                description: menu.description.clone(),
                submenus: tables
                    .submenu_ids_of(*menu_id)
                    .into_iter()
                    .filter_map(|submenu_id| {
                        let submenu = tables.submenus.get(&submenu_id)?;
                        Some(SubmenuNode {
                            id: submenu_id,
                            title: submenu.title.clone(),
                            description: submenu.description.clone(),
                            dishes: tables
                                .dishes_of(submenu_id)
                                .map(|(id, d)| Tables::dish(*id, d))
                                .collect(),
                        })
                    })
                    .collect(),
            })
            .collect())
    }
}
