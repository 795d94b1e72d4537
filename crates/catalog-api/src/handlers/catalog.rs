use std::sync::Arc;

use axum::{extract::State, Json};

use catalog_core::domain::MenuNode;
use catalog_core::services::CatalogService;

use crate::error::ApiError;

/// GET /api/v1/catalog: every menu with nested submenus and dishes.
pub async fn get_catalog(State(catalog): State<Arc<CatalogService>>) -> Result<Json<Vec<MenuNode>>, ApiError> {
    Ok(Json(catalog.catalog().await?))
}
