//! # Catalog Infrastructure
//! 
//! Store, cache and import adapters for the catalog ports.

pub mod database;
pub mod cache;
pub mod memory;
pub mod import;

pub use database::{
    create_pool, postgres_store, run_migrations, PgCatalogRepository, PgDishRepository, PgMenuRepository,
    PgSubmenuRepository,
};
pub use cache::{MemoryCache, RedisCache};
pub use memory::MemoryCatalogStore;
pub use import::XlsxImportSource;
