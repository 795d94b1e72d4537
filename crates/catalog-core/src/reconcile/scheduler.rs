//! Periodic reconciliation task.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

use super::orchestrator::{ReconcileOutcome, Reconciler};

/// Floor for the tick period; `tokio::time::interval` rejects a zero period.
const MIN_PERIOD: Duration = Duration::from_millis(1);

pub struct ReconcileScheduler;

impl ReconcileScheduler {
    /// Run `reconciler` every `period` until `shutdown` flips to `true` or its
    /// sender is dropped. The first run starts immediately. Runs never overlap;
    /// ticks missed during a slow run are skipped. A zero period is raised to
    /// one millisecond.
    pub fn spawn(
        reconciler: Arc<Reconciler>,
        period: Duration,
        mut shutdown: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let period = period.max(MIN_PERIOD);
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            info!("Reconciliation scheduled every {:?}", period);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match reconciler.run().await {
                            Ok(ReconcileOutcome::Applied(report)) if report.changed() > 0 => {
                                info!("Reconciliation applied {} changes", report.changed());
                            }
                            Ok(_) => {}
                            Err(e) => error!("Reconciliation failed: {}", e),
                        }
                    }
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            break;
                        }
                    }
                }
            }

            info!("Reconciliation scheduler stopped");
        })
    }
}
