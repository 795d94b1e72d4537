//! Application services

pub mod entity_service;
pub mod catalog_service;

pub use entity_service::{DishService, EntityService, MenuService, SubmenuService};
pub use catalog_service::CatalogService;

use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheClient, CacheInvalidator, ReadThrough};
use crate::repositories::CatalogStore;

/// Every read/write service of the catalog, sharing one cache.
#[derive(Clone)]
pub struct CatalogServices {
    pub menus: Arc<MenuService>,
    pub submenus: Arc<SubmenuService>,
    pub dishes: Arc<DishService>,
    pub catalog: Arc<CatalogService>,
}

impl CatalogServices {
    pub fn new(store: &CatalogStore, cache: Arc<dyn CacheClient>, ttl: Duration) -> Self {
        let read = ReadThrough::new(cache.clone(), ttl);
        let invalidator = CacheInvalidator::new(cache);

        Self {
            menus: Arc::new(EntityService::new(store.menus.clone(), read.clone(), invalidator.clone())),
            submenus: Arc::new(EntityService::new(store.submenus.clone(), read.clone(), invalidator.clone())),
            dishes: Arc::new(EntityService::new(store.dishes.clone(), read.clone(), invalidator)),
            catalog: Arc::new(CatalogService::new(store.catalog.clone(), read)),
        }
    }
}
