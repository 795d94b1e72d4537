use std::sync::Arc;

use axum::extract::FromRef;
use catalog_core::services::{CatalogService, CatalogServices, DishService, MenuService, SubmenuService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub services: CatalogServices,
}

impl AppState {
    pub fn new(services: CatalogServices) -> Self {
        Self { services }
    }
}

impl FromRef<AppState> for Arc<MenuService> {
    fn from_ref(state: &AppState) -> Self {
        state.services.menus.clone()
    }
}

impl FromRef<AppState> for Arc<SubmenuService> {
    fn from_ref(state: &AppState) -> Self {
        state.services.submenus.clone()
    }
}

impl FromRef<AppState> for Arc<DishService> {
    fn from_ref(state: &AppState) -> Self {
        state.services.dishes.clone()
    }
}

impl FromRef<AppState> for Arc<CatalogService> {
    fn from_ref(state: &AppState) -> Self {
        state.services.catalog.clone()
    }
}
