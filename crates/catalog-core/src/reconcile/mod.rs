//! Bulk reconciliation of the catalog against the import.

pub mod diff;
pub mod orchestrator;
pub mod scheduler;

pub use diff::{diff, ActionPlan, ActionSet, Delete, Insert, Update};
pub use orchestrator::{KindReport, ReconcileOutcome, ReconcileReport, Reconciler};
pub use scheduler::ReconcileScheduler;
