// ============================================================================
// Catalog Core - Cache Invalidation Policy
// File: crates/catalog-core/src/cache/invalidation.rs
// ============================================================================
//! Maps each mutation to the cache entries it makes stale.
//!
//! Menus and submenus expose counts over their descendants, so a write at a
//! lower level also purges every ancestor representation. Patterns cover the
//! unbounded set of descendant keys under a deleted parent.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, warn};

use super::client::{CacheClient, CacheKey};
use super::keys;
use crate::domain::{DishScope, MenuScope, SubmenuScope};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Created,
    Updated,
    Deleted,
}

/// The mutated entity with its full identifier chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Menu(MenuScope),
    Submenu(SubmenuScope),
    Dish(DishScope),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invalidation {
    pub mutation: Mutation,
    pub target: Target,
}

impl Invalidation {
    pub fn new(mutation: Mutation, target: Target) -> Self {
        Self { mutation, target }
    }

    pub fn created(target: Target) -> Self {
        Self::new(Mutation::Created, target)
    }

    pub fn updated(target: Target) -> Self {
        Self::new(Mutation::Updated, target)
    }

    pub fn deleted(target: Target) -> Self {
        Self::new(Mutation::Deleted, target)
    }

    /// Update that may have moved the entity to another parent. A move stales
    /// everything under both chains the way a delete does: reads made under
    /// the new chain before the move (empty lists included) are cached too.
    pub fn relocated(from: Target, to: Target) -> Vec<Self> {
        if from == to {
            vec![Self::updated(to)]
        } else {
            vec![Self::deleted(from), Self::deleted(to)]
        }
    }

    pub fn keys(&self) -> Vec<CacheKey> {
        let mut purge = match (self.mutation, self.target) {
            (Mutation::Created, Target::Menu(_)) => vec![CacheKey::exact(keys::MENU_LIST)],
            (Mutation::Updated, Target::Menu(m)) => vec![
                CacheKey::exact(keys::MENU_LIST),
                CacheKey::exact(keys::menu(m.menu_id)),
            ],
            (Mutation::Deleted, Target::Menu(m)) => vec![
                CacheKey::exact(keys::MENU_LIST),
                CacheKey::exact(keys::menu(m.menu_id)),
                CacheKey::pattern(keys::submenus_under_menu(m.menu_id)),
                CacheKey::pattern(keys::dishes_under_menu(m.menu_id)),
            ],
            (Mutation::Created, Target::Submenu(s)) => vec![
                CacheKey::exact(keys::MENU_LIST),
                CacheKey::exact(keys::menu(s.menu_id)),
                CacheKey::exact(keys::submenu_list(s.menu_id)),
            ],
            (Mutation::Updated, Target::Submenu(s)) => vec![
                CacheKey::exact(keys::submenu_list(s.menu_id)),
                CacheKey::exact(keys::submenu(s.menu_id, s.submenu_id)),
            ],
            (Mutation::Deleted, Target::Submenu(s)) => vec![
                CacheKey::exact(keys::MENU_LIST),
                CacheKey::exact(keys::menu(s.menu_id)),
                CacheKey::exact(keys::submenu_list(s.menu_id)),
                CacheKey::exact(keys::submenu(s.menu_id, s.submenu_id)),
                CacheKey::pattern(keys::dishes_under_submenu(s.menu_id, s.submenu_id)),
            ],
            (Mutation::Created, Target::Dish(d)) => vec![
                CacheKey::exact(keys::MENU_LIST),
                CacheKey::exact(keys::menu(d.menu_id)),
                CacheKey::exact(keys::submenu_list(d.menu_id)),
                CacheKey::exact(keys::submenu(d.menu_id, d.submenu_id)),
                CacheKey::exact(keys::dish_list(d.menu_id, d.submenu_id)),
            ],
            (Mutation::Updated, Target::Dish(d)) => vec![
                CacheKey::exact(keys::dish_list(d.menu_id, d.submenu_id)),
                CacheKey::exact(keys::dish(d.menu_id, d.submenu_id, d.dish_id)),
            ],
            (Mutation::Deleted, Target::Dish(d)) => vec![
                CacheKey::exact(keys::MENU_LIST),
                CacheKey::exact(keys::menu(d.menu_id)),
                CacheKey::exact(keys::submenu_list(d.menu_id)),
                CacheKey::exact(keys::submenu(d.menu_id, d.submenu_id)),
                CacheKey::exact(keys::dish_list(d.menu_id, d.submenu_id)),
                CacheKey::exact(keys::dish(d.menu_id, d.submenu_id, d.dish_id)),
            ],
        };
        // The nested tree embeds every entity.
        purge.push(CacheKey::exact(keys::CATALOG));
        purge
    }
}

/// Union of the keys of several invalidations, deduplicated and ordered.
pub fn resolve(invalidations: &[Invalidation]) -> Vec<CacheKey> {
    invalidations
        .iter()
        .flat_map(Invalidation::keys)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Issues the purge for a batch of invalidations. Failures are logged and
/// dropped: the mutation already happened and a stale entry expires by TTL.
#[derive(Clone)]
pub struct CacheInvalidator {
    cache: Arc<dyn CacheClient>,
}

impl CacheInvalidator {
    pub fn new(cache: Arc<dyn CacheClient>) -> Self {
        Self { cache }
    }

    pub async fn purge(&self, invalidations: &[Invalidation]) {
        let keys = resolve(invalidations);
        if keys.is_empty() {
            return;
        }

        match self.cache.delete(&keys).await {
            Ok(removed) => debug!("Purged {} cache entries for {} key(s)", removed, keys.len()),
            Err(e) => warn!("Cache invalidation failed for {:?}: {}", keys, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheError, MockCacheClient};
    use uuid::Uuid;

    fn ids() -> (Uuid, Uuid, Uuid) {
        (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4())
    }

    fn strs(keys: &[CacheKey]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_menu_create_purges_list_only() {
        let (m, _, _) = ids();
        let keys = Invalidation::created(Target::Menu(MenuScope::new(m))).keys();
        assert_eq!(strs(&keys), vec!["menus", "catalog"]);
    }

    #[test]
    fn test_menu_delete_purges_descendant_patterns() {
        let (m, _, _) = ids();
        let keys = Invalidation::deleted(Target::Menu(MenuScope::new(m))).keys();

        assert!(keys.contains(&CacheKey::exact("menus")));
        assert!(keys.contains(&CacheKey::exact(format!("menus:{}", m))));
        assert!(keys.contains(&CacheKey::pattern(format!("submenus:{}*", m))));
        assert!(keys.contains(&CacheKey::pattern(format!("dishes:{}*", m))));
    }

    #[test]
    fn test_submenu_create_purges_ancestor_counts() {
        let (m, s, _) = ids();
        let keys = Invalidation::created(Target::Submenu(SubmenuScope::new(m, s))).keys();

        assert!(keys.contains(&CacheKey::exact("menus")));
        assert!(keys.contains(&CacheKey::exact(format!("menus:{}", m))));
        assert!(keys.contains(&CacheKey::exact(format!("submenus:{}", m))));
        assert!(!keys.iter().any(CacheKey::is_pattern));
    }

    #[test]
    fn test_submenu_delete_purges_dish_pattern() {
        let (m, s, _) = ids();
        let keys = Invalidation::deleted(Target::Submenu(SubmenuScope::new(m, s))).keys();

        assert!(keys.contains(&CacheKey::exact(format!("submenus:{}:{}", m, s))));
        assert!(keys.contains(&CacheKey::pattern(format!("dishes:{}:{}*", m, s))));
    }

    #[test]
    fn test_dish_update_purges_dish_keys_only() {
        let (m, s, d) = ids();
        let keys = Invalidation::updated(Target::Dish(DishScope::new(m, s, d))).keys();

        assert_eq!(
            strs(&keys),
            vec![
                format!("dishes:{}:{}", m, s),
                format!("dishes:{}:{}:{}", m, s, d),
                "catalog".to_string(),
            ]
        );
    }

    #[test]
    fn test_dish_delete_purges_whole_chain() {
        let (m, s, d) = ids();
        let keys = Invalidation::deleted(Target::Dish(DishScope::new(m, s, d))).keys();
        assert_eq!(keys.len(), 7);
        assert!(keys.contains(&CacheKey::exact(format!("submenus:{}:{}", m, s))));
    }

    #[test]
    fn test_relocation_purges_both_parents() {
        let (m, s, d) = ids();
        let other = Uuid::new_v4();
        let from = Target::Dish(DishScope::new(m, s, d));
        let to = Target::Dish(DishScope::new(m, other, d));

        let keys = resolve(&Invalidation::relocated(from, to));
        assert!(keys.contains(&CacheKey::exact(format!("submenus:{}:{}", m, s))));
        assert!(keys.contains(&CacheKey::exact(format!("submenus:{}:{}", m, other))));
        assert!(keys.contains(&CacheKey::exact(format!("dishes:{}:{}:{}", m, other, d))));

        assert_eq!(Invalidation::relocated(to, to), vec![Invalidation::updated(to)]);
    }

    #[test]
    fn test_moved_submenu_purges_dishes_under_new_chain() {
        let (m, s, _) = ids();
        let other = Uuid::new_v4();
        let from = Target::Submenu(SubmenuScope::new(m, s));
        let to = Target::Submenu(SubmenuScope::new(other, s));

        let keys = resolve(&Invalidation::relocated(from, to));

        assert!(keys.contains(&CacheKey::pattern(format!("dishes:{}:{}*", m, s))));
        assert!(keys.contains(&CacheKey::pattern(format!("dishes:{}:{}*", other, s))));
        assert!(keys.contains(&CacheKey::exact(format!("submenus:{}", other))));
        assert!(keys.contains(&CacheKey::exact(format!("menus:{}", other))));
    }

    #[test]
    fn test_resolve_deduplicates() {
        let (m, _, _) = ids();
        let target = Target::Menu(MenuScope::new(m));
        let keys = resolve(&[Invalidation::created(target), Invalidation::updated(target)]);
        assert_eq!(keys.len(), 3);
    }

    #[tokio::test]
    async fn test_purge_swallows_cache_failure() {
        let mut cache = MockCacheClient::new();
        cache
            .expect_delete()
            .times(1)
            .returning(|_| Err(CacheError::Backend("connection refused".into())));

        let invalidator = CacheInvalidator::new(Arc::new(cache));
        let target = Target::Menu(MenuScope::new(Uuid::new_v4()));
        invalidator.purge(&[Invalidation::created(target)]).await;
    }

    #[tokio::test]
    async fn test_purge_skips_empty_batch() {
        let mut cache = MockCacheClient::new();
        cache.expect_delete().never();

        CacheInvalidator::new(Arc::new(cache)).purge(&[]).await;
    }
}
