//! Nested catalog read (`/catalog` and the reconciliation's live tree).

use std::sync::Arc;

use crate::cache::{keys, ReadThrough};
use crate::domain::MenuNode;
use crate::error::DomainError;
use crate::repositories::CatalogRepository;

pub struct CatalogService {
    repo: Arc<dyn CatalogRepository>,
    read: ReadThrough,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn CatalogRepository>, read: ReadThrough) -> Self {
        Self { repo, read }
    }

    pub async fn catalog(&self) -> Result<Vec<MenuNode>, DomainError> {
        let repo = self.repo.clone();
        let tree = self
            .read
            .get_or_load(keys::CATALOG, move || async move { repo.full_tree().await.map(Some) })
            .await?;
        Ok(tree.unwrap_or_default())
    }
}
