//! Record store interface consumed by the controller.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::config::WatchConfig;
use crate::record::{CredentialRecord, DerivedBundle, RecordKey};

/// Store-level failures.
///
/// `NotFound`, `AlreadyExists` and `Conflict` are explicit variants so
/// callers branch on them instead of string-matching backend errors; every
/// other variant is an unexpected fault worth surfacing.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(RecordKey),
    #[error("record already exists: {0}")]
    AlreadyExists(RecordKey),
    #[error("write conflict on {0}")]
    Conflict(RecordKey),
    #[error("store backend error: {0}")]
    Backend(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Whether this error is a missing-record lookup rather than a fault.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Versioned record store.
///
/// Credentials and watch configurations are read-only through this
/// interface; derived bundles are read-write. Implementations are expected
/// to serialize conflicting writes to the same bundle; the controller
/// performs no locking of its own.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch a namespace's watch configuration.
    async fn watch_config(&self, namespace: &str, name: &str) -> Result<WatchConfig, StoreError>;

    /// Fetch a credential record.
    async fn credential(&self, namespace: &str, name: &str)
        -> Result<CredentialRecord, StoreError>;

    /// Fetch a derived bundle.
    async fn bundle(&self, namespace: &str, name: &str) -> Result<DerivedBundle, StoreError>;

    /// Create a derived bundle; `AlreadyExists` when one is present.
    async fn create_bundle(&self, bundle: DerivedBundle) -> Result<(), StoreError>;

    /// Replace an existing derived bundle in full; `NotFound` when absent.
    async fn update_bundle(&self, bundle: DerivedBundle) -> Result<(), StoreError>;
}
