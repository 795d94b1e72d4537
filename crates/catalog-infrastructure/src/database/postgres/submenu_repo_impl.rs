// ============================================================================
// Catalog Infrastructure - PostgreSQL Submenu Repository
// File: crates/catalog-infrastructure/src/database/postgres/submenu_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use catalog_core::domain::{MenuScope, Submenu, SubmenuFields, SubmenuKind, SubmenuScope};
use catalog_core::error::DomainError;
use catalog_shared::new_id;
use catalog_core::repositories::Repository;

use super::db_error;

const SELECT_SUBMENU: &str = r#"
    SELECT
        s.id, s.menu_id, s.title, s.description,
        (SELECT COUNT(*) FROM dish d WHERE d.submenu_id = s.id) AS dishes_count
    FROM submenu s
"#;

pub struct PgSubmenuRepository {
    pool: PgPool,
}

impl PgSubmenuRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SubmenuRow {
    pub id: Uuid,
    pub menu_id: Uuid,
    pub title: String,
    pub description: String,
    pub dishes_count: i64,
}

impl From<SubmenuRow> for Submenu {
    fn from(row: SubmenuRow) -> Self {
        Submenu {
            id: row.id,
            menu_id: row.menu_id,
            title: row.title,
            description: row.description,
            dishes_count: row.dishes_count,
        }
    }
}

#[async_trait]
impl Repository<SubmenuKind> for PgSubmenuRepository {
    async fn get(&self, scope: SubmenuScope) -> Result<Option<Submenu>, DomainError> {
        let row: Option<SubmenuRow> =
            sqlx::query_as(&format!("{SELECT_SUBMENU} WHERE s.id = $2 AND s.menu_id = $1"))
                .bind(scope.menu_id)
                .bind(scope.submenu_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("finding submenu", e))?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, parent: MenuScope) -> Result<Vec<Submenu>, DomainError> {
        let rows: Vec<SubmenuRow> =
            sqlx::query_as(&format!("{SELECT_SUBMENU} WHERE s.menu_id = $1 ORDER BY s.id"))
                .bind(parent.menu_id)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| db_error("listing submenus", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(
        &self,
        parent: MenuScope,
        id: Option<Uuid>,
        fields: SubmenuFields,
    ) -> Result<Submenu, DomainError> {
        let id = id.unwrap_or_else(new_id);

        // Inserts nothing when the menu does not exist.
        let created: Option<(Uuid,)> = sqlx::query_as(
            r#"
            INSERT INTO submenu (id, menu_id, title, description)
            SELECT $1, m.id, $3, $4 FROM menu m WHERE m.id = $2
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(parent.menu_id)
        .bind(&fields.title)
        .bind(&fields.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("creating submenu", e))?;

        if created.is_none() {
            return Err(DomainError::MenuNotFound);
        }

        Ok(Submenu {
            id,
            menu_id: parent.menu_id,
            title: fields.title,
            description: fields.description,
            dishes_count: 0,
        })
    }

    async fn update(&self, scope: SubmenuScope, fields: SubmenuFields) -> Result<Option<Submenu>, DomainError> {
        let result = sqlx::query(
            "UPDATE submenu SET menu_id = $2, title = $3, description = $4 WHERE id = $1",
        )
        .bind(scope.submenu_id)
        .bind(scope.menu_id)
        .bind(&fields.title)
        .bind(&fields.description)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("updating submenu", e))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(scope).await
    }

    async fn delete(&self, scope: SubmenuScope) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM submenu WHERE id = $2 AND menu_id = $1")
            .bind(scope.menu_id)
            .bind(scope.submenu_id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("deleting submenu", e))?;

        Ok(result.rows_affected() > 0)
    }
}
