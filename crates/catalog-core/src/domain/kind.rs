// ============================================================================
// Catalog Core - Entity Kinds
// File: crates/catalog-core/src/domain/kind.rs
// Description: Per-kind strategy shared by repositories, services and cache
// ============================================================================
//! Every catalog entity kind is described once here: what it reads as, what
//! is written, how it is addressed, and which cache entries describe it. The
//! generic repository port and `EntityService` are parameterized over it.

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{
    CatalogRoot, Dish, DishFields, DishScope, Menu, MenuFields, MenuScope, Submenu,
    SubmenuFields, SubmenuScope,
};
use crate::cache::{keys, Target};
use crate::error::DomainError;

pub trait EntityKind: Send + Sync + 'static {
    /// Lowercase name used in logs and responses.
    const LABEL: &'static str;

    type Entity: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static;
    type Fields: Clone + Debug + PartialEq + Validate + Send + Sync + 'static;
    type Scope: Copy + Debug + Eq + Send + Sync + 'static;
    type Parent: Copy + Debug + Eq + Send + Sync + 'static;

    fn scope(parent: Self::Parent, id: Uuid) -> Self::Scope;
    fn entity_id(entity: &Self::Entity) -> Uuid;
    fn entity_key(scope: &Self::Scope) -> String;
    fn list_key(parent: &Self::Parent) -> String;
    fn target(scope: Self::Scope) -> Target;
    fn not_found() -> DomainError;

    fn normalize(fields: Self::Fields) -> Self::Fields {
        fields
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuKind;
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmenuKind;
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DishKind;

impl EntityKind for MenuKind {
    const LABEL: &'static str = "menu";

    type Entity = Menu;
    type Fields = MenuFields;
    type Scope = MenuScope;
    type Parent = CatalogRoot;

    fn scope(_parent: CatalogRoot, id: Uuid) -> MenuScope {
        MenuScope::new(id)
    }

    fn entity_id(entity: &Menu) -> Uuid {
        entity.id
    }

    fn entity_key(scope: &MenuScope) -> String {
        keys::menu(scope.menu_id)
    }

    fn list_key(_parent: &CatalogRoot) -> String {
        keys::MENU_LIST.to_string()
    }

    fn target(scope: MenuScope) -> Target {
        Target::Menu(scope)
    }

    fn not_found() -> DomainError {
        DomainError::MenuNotFound
    }
}

impl EntityKind for SubmenuKind {
    const LABEL: &'static str = "submenu";

    type Entity = Submenu;
    type Fields = SubmenuFields;
    type Scope = SubmenuScope;
    type Parent = MenuScope;

    fn scope(parent: MenuScope, id: Uuid) -> SubmenuScope {
        parent.submenu(id)
    }

    fn entity_id(entity: &Submenu) -> Uuid {
        entity.id
    }

    fn entity_key(scope: &SubmenuScope) -> String {
        keys::submenu(scope.menu_id, scope.submenu_id)
    }

    fn list_key(parent: &MenuScope) -> String {
        keys::submenu_list(parent.menu_id)
    }

    fn target(scope: SubmenuScope) -> Target {
        Target::Submenu(scope)
    }

    fn not_found() -> DomainError {
        DomainError::SubmenuNotFound
    }
}

impl EntityKind for DishKind {
    const LABEL: &'static str = "dish";

    type Entity = Dish;
    type Fields = DishFields;
    type Scope = DishScope;
    type Parent = SubmenuScope;

    fn scope(parent: SubmenuScope, id: Uuid) -> DishScope {
        parent.dish(id)
    }

    fn entity_id(entity: &Dish) -> Uuid {
        entity.id
    }

    fn entity_key(scope: &DishScope) -> String {
        keys::dish(scope.menu_id, scope.submenu_id, scope.dish_id)
    }

    fn list_key(parent: &SubmenuScope) -> String {
        keys::dish_list(parent.menu_id, parent.submenu_id)
    }

    fn target(scope: DishScope) -> Target {
        Target::Dish(scope)
    }

    fn not_found() -> DomainError {
        DomainError::DishNotFound
    }

    fn normalize(fields: DishFields) -> DishFields {
        fields.normalized()
    }
}
