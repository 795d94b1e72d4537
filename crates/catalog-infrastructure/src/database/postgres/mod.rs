//! PostgreSQL repository implementations

pub mod menu_repo_impl;
pub mod submenu_repo_impl;
pub mod dish_repo_impl;
pub mod catalog_repo_impl;

pub use menu_repo_impl::PgMenuRepository;
pub use submenu_repo_impl::PgSubmenuRepository;
pub use dish_repo_impl::PgDishRepository;
pub use catalog_repo_impl::PgCatalogRepository;

use catalog_core::error::DomainError;
use tracing::error;

/// Log a driver error and map it onto the domain. Key violations surface as
/// conflicts, everything else as a database error.
pub(crate) fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);

    match e.as_database_error() {
        Some(db) if db.is_unique_violation() || db.is_foreign_key_violation() => {
            DomainError::Conflict(db.message().to_string())
        }
        _ => DomainError::DatabaseError(e.to_string()),
    }
}
