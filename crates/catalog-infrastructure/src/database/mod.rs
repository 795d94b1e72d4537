//! Database module (PostgreSQL adapters)

pub mod connection;
pub mod postgres;

pub use connection::{create_pool, run_migrations};
pub use postgres::{PgCatalogRepository, PgDishRepository, PgMenuRepository, PgSubmenuRepository};

use std::sync::Arc;

use catalog_core::repositories::CatalogStore;
use sqlx::PgPool;

/// Every repository port backed by one pool.
pub fn postgres_store(pool: PgPool) -> CatalogStore {
    CatalogStore {
        menus: Arc::new(PgMenuRepository::new(pool.clone())),
        submenus: Arc::new(PgSubmenuRepository::new(pool.clone())),
        dishes: Arc::new(PgDishRepository::new(pool.clone())),
        catalog: Arc::new(PgCatalogRepository::new(pool)),
    }
}
