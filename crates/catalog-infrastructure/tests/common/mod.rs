#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use catalog_core::cache::{CacheClient, CacheInvalidator};
use catalog_core::domain::{Dish, DishFields, DishKind, DishScope, SubmenuScope};
use catalog_core::error::DomainError;
use catalog_core::import::{ImportRow, ImportSource};
use catalog_core::reconcile::Reconciler;
use catalog_core::repositories::{CatalogStore, Repository};
use catalog_core::services::CatalogServices;
use catalog_infrastructure::{MemoryCache, MemoryCatalogStore};

pub const TTL: Duration = Duration::from_secs(600);

pub const M1: &str = "0f8fad5b-d9cb-469f-a165-70867728950e";
pub const M2: &str = "7c9e6679-7425-40de-944b-e07fc1f90ae7";
pub const S1: &str = "b4e1a7e4-1e5f-4b8c-9f3a-2d6c8e0f1a2b";
pub const S2: &str = "c5f2b8f5-2f6a-4c9d-8a4b-3e7d9f1a2b3c";
pub const S3: &str = "a1b2c3d4-0000-4000-8000-000000000003";
pub const D1: &str = "d6a3c9a6-3a7b-4dae-9b5c-4f8e0a2b3c4d";
pub const D2: &str = "e7b4dab7-4b8c-4ebf-8c6d-5a9f1b3c4d5e";
pub const D3: &str = "f8c5ebc8-5c9d-4fc0-9d7e-6b0a2c4d5e6f";

pub fn id(raw: &str) -> uuid::Uuid {
    uuid::Uuid::parse_str(raw).unwrap()
}

/// Sheet rows from literal cells; empty strings are empty cells.
pub fn sheet(rows: &[&[&str]]) -> Vec<ImportRow> {
    rows.iter()
        .enumerate()
        .map(|(i, cells)| {
            ImportRow::new(
                i + 1,
                cells
                    .iter()
                    .map(|c| (!c.is_empty()).then(|| c.to_string()))
                    .collect(),
            )
        })
        .collect()
}

/// Lunch menu: Soups (Tomato, Onion) and Salads (Caesar); Dinner menu, empty.
pub fn lunch_sheet() -> Vec<ImportRow> {
    sheet(&[
        &[M1, "Lunch", "Weekday lunch"],
        &["", S1, "Soups", "Hot soups"],
        &["", "", D1, "Tomato", "With basil", "12.50"],
        &["", "", D2, "Onion", "French style", "9"],
        &["", S2, "Salads", "Cold"],
        &["", "", D3, "Caesar", "Chicken", "11.2"],
        &[M2, "Dinner", "Evening"],
    ])
}

/// Import source whose content the test swaps between runs.
#[derive(Default)]
pub struct SwappableSource {
    rows: Mutex<Option<Vec<ImportRow>>>,
    reads: AtomicUsize,
}

impl SwappableSource {
    pub fn with_rows(rows: Vec<ImportRow>) -> Self {
        let source = Self::default();
        source.replace(Some(rows));
        source
    }

    pub fn replace(&self, rows: Option<Vec<ImportRow>>) {
        *self.rows.lock() = rows;
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImportSource for SwappableSource {
    async fn read_rows(&self) -> Result<Option<Vec<ImportRow>>, DomainError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.lock().clone())
    }
}

/// Dish repository over the memory store that starts failing creates once
/// its budget is spent. `None` budget means healthy.
pub struct FlakyDishes {
    inner: Arc<MemoryCatalogStore>,
    budget: Mutex<Option<usize>>,
}

impl FlakyDishes {
    pub fn failing_after(inner: Arc<MemoryCatalogStore>, creates: usize) -> Self {
        Self {
            inner,
            budget: Mutex::new(Some(creates)),
        }
    }

    pub fn heal(&self) {
        *self.budget.lock() = None;
    }

    fn spend(&self) -> Result<(), DomainError> {
        let mut budget = self.budget.lock();
        match budget.as_mut() {
            Some(0) => Err(DomainError::DatabaseError("connection reset".into())),
            Some(left) => {
                *left -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Repository<DishKind> for FlakyDishes {
    async fn get(&self, scope: DishScope) -> Result<Option<Dish>, DomainError> {
        Repository::<DishKind>::get(self.inner.as_ref(), scope).await
    }

    async fn list(&self, parent: SubmenuScope) -> Result<Vec<Dish>, DomainError> {
        Repository::<DishKind>::list(self.inner.as_ref(), parent).await
    }

    async fn create(
        &self,
        parent: SubmenuScope,
        id: Option<uuid::Uuid>,
        fields: DishFields,
    ) -> Result<Dish, DomainError> {
        self.spend()?;
        Repository::<DishKind>::create(self.inner.as_ref(), parent, id, fields).await
    }

    async fn update(&self, scope: DishScope, fields: DishFields) -> Result<Option<Dish>, DomainError> {
        Repository::<DishKind>::update(self.inner.as_ref(), scope, fields).await
    }

    async fn delete(&self, scope: DishScope) -> Result<bool, DomainError> {
        Repository::<DishKind>::delete(self.inner.as_ref(), scope).await
    }
}

pub struct Harness {
    pub store: Arc<MemoryCatalogStore>,
    pub cache: Arc<MemoryCache>,
    pub services: CatalogServices,
    pub source: Arc<SwappableSource>,
    pub reconciler: Arc<Reconciler>,
}

impl Harness {
    pub fn new(source: SwappableSource) -> Self {
        let store = Arc::new(MemoryCatalogStore::new());
        let catalog_store = CatalogStore::from_backend(store.clone());
        Self::assemble(source, store, catalog_store)
    }

    /// Wire services and reconciler over `catalog_store`; `store` is the
    /// memory backend the ports ultimately write to.
    pub fn assemble(
        source: SwappableSource,
        store: Arc<MemoryCatalogStore>,
        catalog_store: CatalogStore,
    ) -> Self {
        let cache = Arc::new(MemoryCache::new());
        let cache_client: Arc<dyn CacheClient> = cache.clone();
        let services = CatalogServices::new(&catalog_store, cache_client.clone(), TTL);
        let source = Arc::new(source);

        let reconciler = Arc::new(Reconciler::new(
            source.clone(),
            catalog_store,
            services.catalog.clone(),
            CacheInvalidator::new(cache_client),
        ));

        Self {
            store,
            cache,
            services,
            source,
            reconciler,
        }
    }
}
