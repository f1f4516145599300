//! Reconciliation core for republishing CA chains from TLS credentials.
//!
//! Whenever a TLS credential record carrying the export marker attribute
//! changes, the controller extracts the certificate-authority chain from its
//! certificate payload and converges a derived, readable configuration record
//! holding that chain. The controller is stateless between passes: all state
//! lives in the record store, so triggers may be replayed at will (at-least-
//! once delivery, startup resync, manual replay) without drift.
//!
//! Change notification delivery, the storage backend behind [`RecordStore`]
//! and retry scheduling all belong to the embedding host; this crate owns the
//! reconciliation algorithm only.

#![forbid(unsafe_code)]

pub mod config;
pub mod controller;
pub mod error;
pub mod record;
pub mod runner;
pub mod store;

pub use config::{WatchConfig, WATCH_CONFIG_NAME};
pub use controller::{ConvergeOp, Outcome, Reconciler, SkipReason};
pub use error::ReconcileError;
pub use record::{
    CredentialRecord, DerivedBundle, RecordKey, CA_BUNDLE_KEY, CERTIFICATE_CHAIN_KEY,
    DERIVED_NAME_SUFFIX, EXPORT_CA_ATTRIBUTE, RECORD_TYPE_TLS,
};
pub use runner::run;
pub use store::{MemoryStore, RecordStore, StoreError};
