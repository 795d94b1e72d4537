// ============================================================================
// Catalog Core - Entity Service
// File: crates/catalog-core/src/services/entity_service.rs
// ============================================================================
//! CRUD service shared by menus, submenus and dishes: cached reads, validated
//! writes, and cache purging after every successful mutation.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::cache::{CacheInvalidator, Invalidation, ReadThrough};
use crate::domain::{DishKind, EntityKind, MenuKind, SubmenuKind};
use crate::error::DomainError;
use crate::repositories::Repository;

pub type MenuService = EntityService<MenuKind>;
pub type SubmenuService = EntityService<SubmenuKind>;
pub type DishService = EntityService<DishKind>;

pub struct EntityService<K: EntityKind> {
    repo: Arc<dyn Repository<K>>,
    read: ReadThrough,
    invalidator: CacheInvalidator,
}

impl<K: EntityKind> EntityService<K> {
    pub fn new(repo: Arc<dyn Repository<K>>, read: ReadThrough, invalidator: CacheInvalidator) -> Self {
        Self {
            repo,
            read,
            invalidator,
        }
    }

    pub async fn get(&self, scope: K::Scope) -> Result<K::Entity, DomainError> {
        let key = K::entity_key(&scope);
        let repo = self.repo.clone();

        self.read
            .get_or_load(&key, move || async move { repo.get(scope).await })
            .await?
            .ok_or_else(K::not_found)
    }

    pub async fn list(&self, parent: K::Parent) -> Result<Vec<K::Entity>, DomainError> {
        let key = K::list_key(&parent);
        let repo = self.repo.clone();

        let items = self
            .read
            .get_or_load(&key, move || async move { repo.list(parent).await.map(Some) })
            .await?;
        Ok(items.unwrap_or_default())
    }

    pub async fn create(&self, parent: K::Parent, fields: K::Fields) -> Result<K::Entity, DomainError> {
        self.create_with_id(parent, None, fields).await
    }

    /// Create with a caller-supplied identifier (used by the import).
    pub async fn create_with_id(
        &self,
        parent: K::Parent,
        id: Option<Uuid>,
        fields: K::Fields,
    ) -> Result<K::Entity, DomainError> {
        fields.validate()?;
        let entity = self.repo.create(parent, id, K::normalize(fields)).await?;
        let scope = K::scope(parent, K::entity_id(&entity));

        self.invalidator
            .purge(&[Invalidation::created(K::target(scope))])
            .await;

        info!("Created {} {}", K::LABEL, K::entity_id(&entity));
        Ok(entity)
    }

    pub async fn update(&self, scope: K::Scope, fields: K::Fields) -> Result<K::Entity, DomainError> {
        fields.validate()?;

        // The store matches updates by id only; the chain is checked here.
        if self.repo.get(scope).await?.is_none() {
            return Err(K::not_found());
        }

        let entity = self
            .repo
            .update(scope, K::normalize(fields))
            .await?
            .ok_or_else(K::not_found)?;

        self.invalidator
            .purge(&[Invalidation::updated(K::target(scope))])
            .await;

        info!("Updated {} {}", K::LABEL, K::entity_id(&entity));
        Ok(entity)
    }

    pub async fn delete(&self, scope: K::Scope) -> Result<(), DomainError> {
        if !self.repo.delete(scope).await? {
            return Err(K::not_found());
        }

        self.invalidator
            .purge(&[Invalidation::deleted(K::target(scope))])
            .await;

        info!("Deleted {} {:?}", K::LABEL, scope);
        Ok(())
    }
}
