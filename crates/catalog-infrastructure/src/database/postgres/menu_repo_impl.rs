// ============================================================================
// Catalog Infrastructure - PostgreSQL Menu Repository
// File: crates/catalog-infrastructure/src/database/postgres/menu_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use catalog_core::domain::{CatalogRoot, Menu, MenuFields, MenuKind, MenuScope};
use catalog_core::error::DomainError;
use catalog_shared::new_id;
use catalog_core::repositories::Repository;

use super::db_error;

const SELECT_MENU: &str = r#"
    SELECT
        m.id, m.title, m.description,
        (SELECT COUNT(*) FROM submenu s WHERE s.menu_id = m.id) AS submenus_count,
        (SELECT COUNT(*) FROM dish d JOIN submenu s ON s.id = d.submenu_id
            WHERE s.menu_id = m.id) AS dishes_count
    FROM menu m
"#;

pub struct PgMenuRepository {
    pool: PgPool,
}

impl PgMenuRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct MenuRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub submenus_count: i64,
    pub dishes_count: i64,
}

impl From<MenuRow> for Menu {
    fn from(row: MenuRow) -> Self {
        Menu {
            id: row.id,
            title: row.title,
            description: row.description,
            submenus_count: row.submenus_count,
            dishes_count: row.dishes_count,
        }
    }
}

#[async_trait]
impl Repository<MenuKind> for PgMenuRepository {
    async fn get(&self, scope: MenuScope) -> Result<Option<Menu>, DomainError> {
        let row: Option<MenuRow> = sqlx::query_as(&format!("{SELECT_MENU} WHERE m.id = $1"))
            .bind(scope.menu_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("finding menu", e))?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, _parent: CatalogRoot) -> Result<Vec<Menu>, DomainError> {
        let rows: Vec<MenuRow> = sqlx::query_as(&format!("{SELECT_MENU} ORDER BY m.id"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("listing menus", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(
        &self,
        _parent: CatalogRoot,
        id: Option<Uuid>,
        fields: MenuFields,
    ) -> Result<Menu, DomainError> {
        let id = id.unwrap_or_else(new_id);

        sqlx::query("INSERT INTO menu (id, title, description) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(&fields.title)
            .bind(&fields.description)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("creating menu", e))?;

        Ok(Menu {
            id,
            title: fields.title,
            description: fields.description,
            submenus_count: 0,
            dishes_count: 0,
        })
    }

    async fn update(&self, scope: MenuScope, fields: MenuFields) -> Result<Option<Menu>, DomainError> {
        let result = sqlx::query("UPDATE menu SET title = $2, description = $3 WHERE id = $1")
            .bind(scope.menu_id)
            .bind(&fields.title)
            .bind(&fields.description)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("updating menu", e))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(scope).await
    }

    async fn delete(&self, scope: MenuScope) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM menu WHERE id = $1")
            .bind(scope.menu_id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("deleting menu", e))?;

        Ok(result.rows_affected() > 0)
    }
}
