//! Route table

use axum::{routing::get, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use catalog_shared::constants::API_PREFIX;

use crate::handlers::{catalog, dishes, health, menus, submenus};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let api: Router<AppState> = Router::new()
        .route("/health", get(health::health_check))
        .route("/menus", get(menus::list_menus).post(menus::create_menu))
        .route(
            "/menus/{menu_id}",
            get(menus::get_menu)
                .patch(menus::update_menu)
                .delete(menus::delete_menu),
        )
        .route(
            "/menus/{menu_id}/submenus",
            get(submenus::list_submenus).post(submenus::create_submenu),
        )
        .route(
            "/menus/{menu_id}/submenus/{submenu_id}",
            get(submenus::get_submenu)
                .patch(submenus::update_submenu)
                .delete(submenus::delete_submenu),
        )
        .route(
            "/menus/{menu_id}/submenus/{submenu_id}/dishes",
            get(dishes::list_dishes).post(dishes::create_dish),
        )
        .route(
            "/menus/{menu_id}/submenus/{submenu_id}/dishes/{dish_id}",
            get(dishes::get_dish)
                .patch(dishes::update_dish)
                .delete(dishes::delete_dish),
        )
        .route("/catalog", get(catalog::get_catalog));

    Router::new()
        .nest(API_PREFIX, api)
        .with_state(state)
        // CORS
        .layer(CorsLayer::permissive())
        // Tracing
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
