//! Full catalog tree repository trait (port)

use async_trait::async_trait;

use crate::domain::MenuNode;
use crate::error::DomainError;

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Every menu with its submenus and their dishes.
    async fn full_tree(&self) -> Result<Vec<MenuNode>, DomainError>;
}
