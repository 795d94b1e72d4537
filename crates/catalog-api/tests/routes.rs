use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use catalog_api::{build_router, AppState};
use catalog_core::cache::CacheClient;
use catalog_core::repositories::CatalogStore;
use catalog_core::services::CatalogServices;
use catalog_infrastructure::{MemoryCache, MemoryCatalogStore};

fn app() -> Router {
    let store = CatalogStore::from_backend(Arc::new(MemoryCatalogStore::new()));
    let cache: Arc<dyn CacheClient> = Arc::new(MemoryCache::new());
    let services = CatalogServices::new(&store, cache, Duration::from_secs(600));
    build_router(AppState::new(services))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(match body {
            Some(json) => Body::from(json.to_string()),
            None => Body::empty(),
        })
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn create(app: &Router, uri: &str, body: Value) -> Value {
    let (status, json) = send(app, Method::POST, uri, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "POST {uri} -> {json}");
    json
}

#[tokio::test]
async fn test_health() {
    let (status, json) = send(&app(), Method::GET, "/api/v1/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_menu_lifecycle() {
    let app = app();

    let menu = create(&app, "/api/v1/menus", json!({"title": "Lunch", "description": "Weekday"})).await;
    let id = menu["id"].as_str().unwrap().to_string();
    assert_eq!(menu["submenus_count"], 0);

    let (status, list) = send(&app, Method::GET, "/api/v1/menus", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let uri = format!("/api/v1/menus/{id}");
    let (status, updated) = send(
        &app,
        Method::PATCH,
        &uri,
        Some(json!({"title": "Dinner", "description": "Evening"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Dinner");

    let (status, deleted) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({"status": true, "message": "The menu has been deleted"}));

    let (status, missing) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing["message"], "menu not found");
}

#[tokio::test]
async fn test_nested_counts_and_catalog() {
    let app = app();

    let menu = create(&app, "/api/v1/menus", json!({"title": "Lunch", "description": ""})).await;
    let menu_id = menu["id"].as_str().unwrap().to_string();
    let submenus_uri = format!("/api/v1/menus/{menu_id}/submenus");
    let soups = create(&app, &submenus_uri, json!({"title": "Soups", "description": ""})).await;
    create(&app, &submenus_uri, json!({"title": "Salads", "description": ""})).await;

    let dishes_uri = format!("{submenus_uri}/{}/dishes", soups["id"].as_str().unwrap());
    for (title, price) in [("Tomato", json!("12.5")), ("Onion", json!(9)), ("Pea", json!("3.333"))] {
        create(&app, &dishes_uri, json!({"title": title, "description": "", "price": price})).await;
    }

    let (_, menu) = send(&app, Method::GET, &format!("/api/v1/menus/{menu_id}"), None).await;
    assert_eq!(menu["submenus_count"], 2);
    assert_eq!(menu["dishes_count"], 3);

    let (_, dishes) = send(&app, Method::GET, &dishes_uri, None).await;
    let mut prices: Vec<&str> = dishes
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["price"].as_str().unwrap())
        .collect();
    prices.sort();
    assert_eq!(prices, vec!["12.50", "3.33", "9.00"]);

    let (status, catalog) = send(&app, Method::GET, "/api/v1/catalog", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(catalog[0]["submenus"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_child_under_missing_parent_is_not_found() {
    let app = app();
    let stranger = uuid::Uuid::new_v4();

    let (status, json) = send(
        &app,
        Method::POST,
        &format!("/api/v1/menus/{stranger}/submenus"),
        Some(json!({"title": "Soups", "description": ""})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({"error": "NotFound", "message": "menu not found"}));
}

#[tokio::test]
async fn test_invalid_payload_is_unprocessable() {
    let app = app();

    let (status, json) = send(
        &app,
        Method::POST,
        "/api/v1/menus",
        Some(json!({"title": "", "description": ""})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "ValidationError");
}
