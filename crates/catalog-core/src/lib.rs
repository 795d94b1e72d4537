//! # Catalog Core
//! 
//! Domain entities, repository and cache ports, read-through services, and the
//! spreadsheet reconciliation engine for the menu catalog.

pub mod domain;
pub mod error;
pub mod repositories;
pub mod cache;
pub mod services;
pub mod import;
pub mod reconcile;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
