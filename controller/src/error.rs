//! Controller-level failure taxonomy.

use crate::record::RecordKey;
use crate::store::StoreError;

/// A reconciliation pass that could not complete.
///
/// Irrelevant triggers are not errors (see
/// [`SkipReason`](crate::controller::SkipReason)); every variant here means a
/// store round-trip failed and the trigger is worth redelivering. Each
/// variant names the operation and the record involved so an operator can
/// diagnose from the log line alone.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    /// The mandatory watch configuration could not be fetched.
    #[error("fetching watch config {key}: {source}")]
    WatchConfig {
        key: RecordKey,
        #[source]
        source: StoreError,
    },

    /// The triggering credential could not be fetched. Not-found is never
    /// mapped here; it is a routine skip.
    #[error("fetching credential {key}: {source}")]
    Credential {
        key: RecordKey,
        #[source]
        source: StoreError,
    },

    /// The derived bundle could not be created or updated.
    #[error("converging bundle {key}: {source}")]
    Converge {
        key: RecordKey,
        #[source]
        source: StoreError,
    },
}
