//! Full catalog tree, assembled from three ordered scans.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use catalog_core::domain::{normalize_price, Dish, MenuNode, SubmenuNode};
use catalog_core::error::DomainError;
use catalog_core::repositories::CatalogRepository;

use super::db_error;

pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NodeRow {
    id: Uuid,
    parent_id: Option<Uuid>,
    title: String,
    description: String,
}

#[derive(Debug, FromRow)]
struct DishRow {
    id: Uuid,
    submenu_id: Uuid,
    title: String,
    description: String,
    price: Decimal,
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    /// The three scans share one read-only snapshot, so a concurrent write
    /// cannot leave a child pointing at a parent the tree does not contain.
    async fn full_tree(&self) -> Result<Vec<MenuNode>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("starting catalog snapshot", e))?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("starting catalog snapshot", e))?;

        let menus: Vec<NodeRow> = sqlx::query_as(
            "SELECT id, NULL::uuid AS parent_id, title, description FROM menu ORDER BY id",
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| db_error("reading catalog menus", e))?;

        let submenus: Vec<NodeRow> = sqlx::query_as(
            "SELECT id, menu_id AS parent_id, title, description FROM submenu ORDER BY id",
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| db_error("reading catalog submenus", e))?;

        let dishes: Vec<DishRow> = sqlx::query_as(
            "SELECT id, submenu_id, title, description, price FROM dish ORDER BY id",
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| db_error("reading catalog dishes", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("closing catalog snapshot", e))?;

        Ok(assemble_tree(menus, submenus, dishes))
    }
}

/// Nest the ordered scans. Rows whose parent is absent are dropped.
fn assemble_tree(
    menus: Vec<NodeRow>,
    submenus: Vec<NodeRow>,
    dishes: Vec<DishRow>,
) -> Vec<MenuNode> {
    let mut dishes_by_submenu: HashMap<Uuid, Vec<Dish>> = HashMap::new();
    for row in dishes {
        dishes_by_submenu.entry(row.submenu_id).or_default().push(Dish {
            id: row.id,
            submenu_id: row.submenu_id,
            title: row.title,
            description: row.description,
            price: normalize_price(row.price),
        });
    }

    let mut submenus_by_menu: HashMap<Uuid, Vec<SubmenuNode>> = HashMap::new();
    for row in submenus {
        let Some(menu_id) = row.parent_id else { continue };
        submenus_by_menu.entry(menu_id).or_default().push(SubmenuNode {
            dishes: dishes_by_submenu.remove(&row.id).unwrap_or_default(),
            id: row.id,
            title: row.title,
            description: row.description,
        });
    }

    menus
        .into_iter()
        .map(|row| MenuNode {
            submenus: submenus_by_menu.remove(&row.id).unwrap_or_default(),
            id: row.id,
            title: row.title,
            description: row.description,
        })
        .collect()
}
