// ============================================================================
// Catalog Infrastructure - PostgreSQL Dish Repository
// File: crates/catalog-infrastructure/src/database/postgres/dish_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use catalog_core::domain::{normalize_price, Dish, DishFields, DishKind, DishScope, SubmenuScope};
use catalog_core::error::DomainError;
use catalog_shared::new_id;
use catalog_core::repositories::Repository;

use super::db_error;

const SELECT_DISH: &str = r#"
    SELECT d.id, d.submenu_id, d.title, d.description, d.price
    FROM dish d
    JOIN submenu s ON s.id = d.submenu_id
"#;

pub struct PgDishRepository {
    pool: PgPool,
}

impl PgDishRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct DishRow {
    pub id: Uuid,
    pub submenu_id: Uuid,
    pub title: String,
    pub description: String,
    pub price: Decimal,
}

impl From<DishRow> for Dish {
    fn from(row: DishRow) -> Self {
        Dish {
            id: row.id,
            submenu_id: row.submenu_id,
            title: row.title,
            description: row.description,
            price: normalize_price(row.price),
        }
    }
}

#[async_trait]
impl Repository<DishKind> for PgDishRepository {
    async fn get(&self, scope: DishScope) -> Result<Option<Dish>, DomainError> {
        let row: Option<DishRow> = sqlx::query_as(&format!(
            "{SELECT_DISH} WHERE d.id = $3 AND s.id = $2 AND s.menu_id = $1"
        ))
        .bind(scope.menu_id)
        .bind(scope.submenu_id)
        .bind(scope.dish_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding dish", e))?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, parent: SubmenuScope) -> Result<Vec<Dish>, DomainError> {
        let rows: Vec<DishRow> = sqlx::query_as(&format!(
            "{SELECT_DISH} WHERE s.id = $2 AND s.menu_id = $1 ORDER BY d.id"
        ))
        .bind(parent.menu_id)
        .bind(parent.submenu_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing dishes", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(
        &self,
        parent: SubmenuScope,
        id: Option<Uuid>,
        fields: DishFields,
    ) -> Result<Dish, DomainError> {
        let id = id.unwrap_or_else(new_id);

        let row: Option<DishRow> = sqlx::query_as(
            r#"
            INSERT INTO dish (id, submenu_id, title, description, price)
            SELECT $1, s.id, $4, $5, $6 FROM submenu s WHERE s.id = $3 AND s.menu_id = $2
            RETURNING id, submenu_id, title, description, price
            "#,
        )
        .bind(id)
        .bind(parent.menu_id)
        .bind(parent.submenu_id)
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(fields.price)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("creating dish", e))?;

        let dish: Dish = row.ok_or(DomainError::SubmenuNotFound)?.into();
        Ok(dish)
    }

    async fn update(&self, scope: DishScope, fields: DishFields) -> Result<Option<Dish>, DomainError> {
        let row: Option<DishRow> = sqlx::query_as(
            r#"
            UPDATE dish
            SET submenu_id = $2, title = $3, description = $4, price = $5
            WHERE id = $1
            RETURNING id, submenu_id, title, description, price
            "#,
        )
        .bind(scope.dish_id)
        .bind(scope.submenu_id)
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(fields.price)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("updating dish", e))?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, scope: DishScope) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM dish d
            USING submenu s
            WHERE d.id = $3 AND d.submenu_id = s.id AND s.id = $2 AND s.menu_id = $1
            "#,
        )
        .bind(scope.menu_id)
        .bind(scope.submenu_id)
        .bind(scope.dish_id)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("deleting dish", e))?;

        Ok(result.rows_affected() > 0)
    }
}
