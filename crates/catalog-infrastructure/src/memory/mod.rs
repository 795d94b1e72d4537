//! In-process catalog store

pub mod store;

pub use store::MemoryCatalogStore;
