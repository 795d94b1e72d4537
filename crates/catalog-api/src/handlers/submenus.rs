// ============================================================================
// Catalog API - Submenu Handlers
// File: crates/catalog-api/src/handlers/submenus.rs
// ============================================================================

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use catalog_core::domain::{MenuScope, Submenu, SubmenuFields, SubmenuScope};
use catalog_core::services::SubmenuService;

use crate::error::ApiError;
use crate::response::DeleteResponse;

pub async fn list_submenus(
    State(submenus): State<Arc<SubmenuService>>,
    Path(menu_id): Path<Uuid>,
) -> Result<Json<Vec<Submenu>>, ApiError> {
    Ok(Json(submenus.list(MenuScope::new(menu_id)).await?))
}

pub async fn create_submenu(
    State(submenus): State<Arc<SubmenuService>>,
    Path(menu_id): Path<Uuid>,
    Json(payload): Json<SubmenuFields>,
) -> Result<(StatusCode, Json<Submenu>), ApiError> {
    let submenu = submenus.create(MenuScope::new(menu_id), payload).await?;
    Ok((StatusCode::CREATED, Json(submenu)))
}

pub async fn get_submenu(
    State(submenus): State<Arc<SubmenuService>>,
    Path((menu_id, submenu_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Submenu>, ApiError> {
    Ok(Json(submenus.get(SubmenuScope::new(menu_id, submenu_id)).await?))
}

pub async fn update_submenu(
    State(submenus): State<Arc<SubmenuService>>,
    Path((menu_id, submenu_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<SubmenuFields>,
) -> Result<Json<Submenu>, ApiError> {
    let scope = SubmenuScope::new(menu_id, submenu_id);
    Ok(Json(submenus.update(scope, payload).await?))
}

pub async fn delete_submenu(
    State(submenus): State<Arc<SubmenuService>>,
    Path((menu_id, submenu_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<DeleteResponse>, ApiError> {
    submenus.delete(SubmenuScope::new(menu_id, submenu_id)).await?;
    Ok(Json(DeleteResponse::deleted("submenu")))
}
