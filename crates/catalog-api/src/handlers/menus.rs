// ============================================================================
// Catalog API - Menu Handlers
// File: crates/catalog-api/src/handlers/menus.rs
// ============================================================================

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use catalog_core::domain::{CatalogRoot, Menu, MenuFields, MenuScope};
use catalog_core::services::MenuService;

use crate::error::ApiError;
use crate::response::DeleteResponse;

/// GET /api/v1/menus
pub async fn list_menus(State(menus): State<Arc<MenuService>>) -> Result<Json<Vec<Menu>>, ApiError> {
    Ok(Json(menus.list(CatalogRoot).await?))
}

/// POST /api/v1/menus
pub async fn create_menu(
    State(menus): State<Arc<MenuService>>,
    Json(payload): Json<MenuFields>,
) -> Result<(StatusCode, Json<Menu>), ApiError> {
    let menu = menus.create(CatalogRoot, payload).await?;
    Ok((StatusCode::CREATED, Json(menu)))
}

/// GET /api/v1/menus/{menu_id}
pub async fn get_menu(
    State(menus): State<Arc<MenuService>>,
    Path(menu_id): Path<Uuid>,
) -> Result<Json<Menu>, ApiError> {
    Ok(Json(menus.get(MenuScope::new(menu_id)).await?))
}

/// PATCH /api/v1/menus/{menu_id}
pub async fn update_menu(
    State(menus): State<Arc<MenuService>>,
    Path(menu_id): Path<Uuid>,
    Json(payload): Json<MenuFields>,
) -> Result<Json<Menu>, ApiError> {
    Ok(Json(menus.update(MenuScope::new(menu_id), payload).await?))
}

/// DELETE /api/v1/menus/{menu_id}
pub async fn delete_menu(
    State(menus): State<Arc<MenuService>>,
    Path(menu_id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, ApiError> {
    menus.delete(MenuScope::new(menu_id)).await?;
    Ok(Json(DeleteResponse::deleted("menu")))
}
