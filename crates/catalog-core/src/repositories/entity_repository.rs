//! Generic entity repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::EntityKind;
use crate::error::DomainError;

/// One interface for every catalog kind. `Scope` is the full identifier chain,
/// so a lookup under the wrong parent finds nothing.
#[async_trait]
pub trait Repository<K: EntityKind>: Send + Sync {
    async fn get(&self, scope: K::Scope) -> Result<Option<K::Entity>, DomainError>;

    async fn list(&self, parent: K::Parent) -> Result<Vec<K::Entity>, DomainError>;

    /// Insert under `parent`. A `None` id is generated by the store. Fails with
    /// the parent's not-found error when the parent chain does not exist.
    async fn create(
        &self,
        parent: K::Parent,
        id: Option<Uuid>,
        fields: K::Fields,
    ) -> Result<K::Entity, DomainError>;

    /// Match by the entity id alone and write the parent reference from
    /// `scope`; a different parent than the stored one re-parents the entity.
    async fn update(
        &self,
        scope: K::Scope,
        fields: K::Fields,
    ) -> Result<Option<K::Entity>, DomainError>;

    /// Delete the entity and its descendants. Returns false when nothing matched.
    async fn delete(&self, scope: K::Scope) -> Result<bool, DomainError>;
}
