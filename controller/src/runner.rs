//! Trigger drain loop connecting a trigger source to the controller.

use tokio::sync::mpsc::Receiver;
use tracing::{error, info};

use crate::controller::Reconciler;
use crate::record::RecordKey;
use crate::store::RecordStore;

/// Drain `triggers` until the channel closes, reconciling each key in turn.
///
/// The producer side decides how keys are generated (poll loop, push
/// subscription, watch stream) and whether a failed trigger is redelivered;
/// this loop logs failures and keeps going. Dropping the sending half (or
/// this future) stops the loop; the controller's single mutating operation
/// is safe to re-run after a cancel-then-retry.
pub async fn run<S: RecordStore>(reconciler: Reconciler<S>, mut triggers: Receiver<RecordKey>) {
    info!("reconciler started");
    while let Some(trigger) = triggers.recv().await {
        if let Err(err) = reconciler.reconcile(&trigger).await {
            error!(record = %trigger, error = %err, "reconciliation failed");
        }
    }
    info!("trigger channel closed, reconciler stopping");
}
