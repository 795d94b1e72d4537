// ============================================================================
// Catalog Core - Reconciliation Orchestrator
// File: crates/catalog-core/src/reconcile/orchestrator.rs
// ============================================================================
//! One reconciliation run: read import -> parse -> fetch live tree -> diff ->
//! apply in dependency order -> purge cache per step.
//!
//! There is no transaction around the run. A store failure aborts the rest of
//! the apply phase and the next run re-diffs against whatever was applied.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::diff::{diff, ActionPlan, Delete, Insert, Update};
use crate::cache::{CacheInvalidator, Invalidation};
use crate::domain::EntityKind;
use crate::error::DomainError;
use crate::import::{parse_rows, ImportSource};
use crate::repositories::{CatalogStore, Repository};
use crate::services::CatalogService;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KindReport {
    pub inserted: usize,
    pub updated: usize,
    pub deleted: usize,
    /// Updates and deletes that found nothing to act on.
    pub skipped: usize,
}

impl KindReport {
    pub fn changed(&self) -> usize {
        self.inserted + self.updated + self.deleted
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub menus: KindReport,
    pub submenus: KindReport,
    pub dishes: KindReport,
}

impl ReconcileReport {
    pub fn changed(&self) -> usize {
        self.menus.changed() + self.submenus.changed() + self.dishes.changed()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The import source does not exist.
    Skipped,
    Applied(ReconcileReport),
}

pub struct Reconciler {
    source: Arc<dyn ImportSource>,
    store: CatalogStore,
    catalog: Arc<CatalogService>,
    invalidator: CacheInvalidator,
}

impl Reconciler {
    pub fn new(
        source: Arc<dyn ImportSource>,
        store: CatalogStore,
        catalog: Arc<CatalogService>,
        invalidator: CacheInvalidator,
    ) -> Self {
        Self {
            source,
            store,
            catalog,
            invalidator,
        }
    }

    pub async fn run(&self) -> Result<ReconcileOutcome, DomainError> {
        let started_at = Utc::now();

        let Some(rows) = self.source.read_rows().await? else {
            debug!("Import source absent, nothing to reconcile");
            return Ok(ReconcileOutcome::Skipped);
        };

        let candidate = parse_rows(rows);
        let live = self.catalog.catalog().await?;
        let plan = diff(candidate, &live);

        let mut report = ReconcileReport {
            started_at,
            finished_at: started_at,
            menus: KindReport::default(),
            submenus: KindReport::default(),
            dishes: KindReport::default(),
        };

        if plan.is_empty() {
            debug!("Catalog already matches the import");
        } else {
            info!("Applying {} reconciliation actions", plan.len());
            self.apply(plan, &mut report).await?;
        }

        report.finished_at = Utc::now();
        info!(
            "Reconciliation finished: menus {:?}, submenus {:?}, dishes {:?}",
            report.menus, report.submenus, report.dishes
        );
        Ok(ReconcileOutcome::Applied(report))
    }

    /// Parents before children for inserts and updates, children before
    /// parents for deletes.
    async fn apply(&self, plan: ActionPlan, report: &mut ReconcileReport) -> Result<(), DomainError> {
        let ActionPlan {
            menus,
            submenus,
            dishes,
        } = plan;
        let store = &self.store;

        self.insert_all(store.menus.as_ref(), menus.insert, &mut report.menus).await?;
        self.insert_all(store.submenus.as_ref(), submenus.insert, &mut report.submenus).await?;
        self.insert_all(store.dishes.as_ref(), dishes.insert, &mut report.dishes).await?;

        self.update_all(store.menus.as_ref(), menus.update, &mut report.menus).await?;
        self.update_all(store.submenus.as_ref(), submenus.update, &mut report.submenus).await?;
        self.update_all(store.dishes.as_ref(), dishes.update, &mut report.dishes).await?;

        self.delete_all(store.dishes.as_ref(), dishes.delete, &mut report.dishes).await?;
        self.delete_all(store.submenus.as_ref(), submenus.delete, &mut report.submenus).await?;
        self.delete_all(store.menus.as_ref(), menus.delete, &mut report.menus).await?;

        Ok(())
    }

    async fn insert_all<K: EntityKind>(
        &self,
        repo: &dyn Repository<K>,
        inserts: Vec<Insert<K>>,
        report: &mut KindReport,
    ) -> Result<(), DomainError> {
        let mut purge = Vec::with_capacity(inserts.len());
        let mut failure = None;

        for insert in inserts {
            let scope = insert.scope();
            match repo.create(insert.parent, Some(insert.id), insert.fields).await {
                Ok(_) => {
                    purge.push(Invalidation::created(K::target(scope)));
                    report.inserted += 1;
                }
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        self.finish_step::<K>("insert", &purge, failure).await
    }

    async fn update_all<K: EntityKind>(
        &self,
        repo: &dyn Repository<K>,
        updates: Vec<Update<K>>,
        report: &mut KindReport,
    ) -> Result<(), DomainError> {
        let mut purge = Vec::with_capacity(updates.len());
        let mut failure = None;

        for update in updates {
            match repo.update(update.scope, update.fields).await {
                Ok(Some(_)) => {
                    purge.extend(Invalidation::relocated(
                        K::target(update.previous),
                        K::target(update.scope),
                    ));
                    report.updated += 1;
                }
                Ok(None) => {
                    warn!("Reconcile update skipped, {} {:?} no longer exists", K::LABEL, update.scope);
                    report.skipped += 1;
                }
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        self.finish_step::<K>("update", &purge, failure).await
    }

    async fn delete_all<K: EntityKind>(
        &self,
        repo: &dyn Repository<K>,
        deletes: Vec<Delete<K>>,
        report: &mut KindReport,
    ) -> Result<(), DomainError> {
        let mut purge = Vec::with_capacity(deletes.len());
        let mut failure = None;

        for delete in deletes {
            match repo.delete(delete.scope).await {
                Ok(true) => {
                    purge.push(Invalidation::deleted(K::target(delete.scope)));
                    report.deleted += 1;
                }
                Ok(false) => {
                    warn!("Reconcile delete skipped, {} {:?} not found", K::LABEL, delete.scope);
                    report.skipped += 1;
                }
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        self.finish_step::<K>("delete", &purge, failure).await
    }

    /// Purge whatever the step managed to apply, then surface its failure.
    async fn finish_step<K: EntityKind>(
        &self,
        step: &str,
        purge: &[Invalidation],
        failure: Option<DomainError>,
    ) -> Result<(), DomainError> {
        self.invalidator.purge(purge).await;

        match failure {
            Some(e) => {
                warn!("Reconcile {} {} step aborted: {}", K::LABEL, step, e);
                Err(e)
            }
            None => Ok(()),
        }
    }
}
