//! Repository traits (ports)

pub mod entity_repository;
pub mod catalog_repository;
pub mod store;

pub use entity_repository::Repository;
pub use catalog_repository::CatalogRepository;
pub use store::CatalogStore;
