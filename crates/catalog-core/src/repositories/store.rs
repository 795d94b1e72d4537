//! Bundle of the repository ports backing one catalog.

use std::sync::Arc;

use super::{CatalogRepository, Repository};
use crate::domain::{DishKind, MenuKind, SubmenuKind};

#[derive(Clone)]
pub struct CatalogStore {
    pub menus: Arc<dyn Repository<MenuKind>>,
    pub submenus: Arc<dyn Repository<SubmenuKind>>,
    pub dishes: Arc<dyn Repository<DishKind>>,
    pub catalog: Arc<dyn CatalogRepository>,
}

impl CatalogStore {
    /// Use one backend for every port.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: Repository<MenuKind>
            + Repository<SubmenuKind>
            + Repository<DishKind>
            + CatalogRepository
            + 'static,
    {
        Self {
            menus: backend.clone(),
            submenus: backend.clone(),
            dishes: backend.clone(),
            catalog: backend,
        }
    }
}
