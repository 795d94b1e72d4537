// ============================================================================
// Catalog API - Dish Handlers
// File: crates/catalog-api/src/handlers/dishes.rs
// ============================================================================

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use catalog_core::domain::{Dish, DishFields, DishScope, SubmenuScope};
use catalog_core::services::DishService;

use crate::error::ApiError;
use crate::response::DeleteResponse;

pub async fn list_dishes(
    State(dishes): State<Arc<DishService>>,
    Path((menu_id, submenu_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Vec<Dish>>, ApiError> {
    Ok(Json(dishes.list(SubmenuScope::new(menu_id, submenu_id)).await?))
}

pub async fn create_dish(
    State(dishes): State<Arc<DishService>>,
    Path((menu_id, submenu_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<DishFields>,
) -> Result<(StatusCode, Json<Dish>), ApiError> {
    let dish = dishes
        .create(SubmenuScope::new(menu_id, submenu_id), payload)
        .await?;
    Ok((StatusCode::CREATED, Json(dish)))
}

pub async fn get_dish(
    State(dishes): State<Arc<DishService>>,
    Path((menu_id, submenu_id, dish_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Json<Dish>, ApiError> {
    let scope = DishScope::new(menu_id, submenu_id, dish_id);
    Ok(Json(dishes.get(scope).await?))
}

pub async fn update_dish(
    State(dishes): State<Arc<DishService>>,
    Path((menu_id, submenu_id, dish_id)): Path<(Uuid, Uuid, Uuid)>,
    Json(payload): Json<DishFields>,
) -> Result<Json<Dish>, ApiError> {
    let scope = DishScope::new(menu_id, submenu_id, dish_id);
    Ok(Json(dishes.update(scope, payload).await?))
}

pub async fn delete_dish(
    State(dishes): State<Arc<DishService>>,
    Path((menu_id, submenu_id, dish_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Json<DeleteResponse>, ApiError> {
    dishes.delete(DishScope::new(menu_id, submenu_id, dish_id)).await?;
    Ok(Json(DeleteResponse::deleted("dish")))
}
