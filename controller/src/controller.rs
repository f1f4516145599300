//! The reconciliation pipeline.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use certwatch_chain::{decode_chain, select_chain};

use crate::config::WATCH_CONFIG_NAME;
use crate::error::ReconcileError;
use crate::record::{DerivedBundle, RecordKey, RECORD_TYPE_TLS};
use crate::store::{RecordStore, StoreError};

/// How a completed reconciliation left the derived bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergeOp {
    /// The bundle did not exist and was created.
    Created,
    /// An existing bundle was replaced in full.
    Updated,
}

/// Why a trigger was ignored without touching the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The credential no longer exists; deletions are routine.
    CredentialMissing,
    /// The record is not of the TLS type.
    NotTls,
    /// The CA-export marker attribute is absent.
    NoMarker,
    /// The certificate-chain payload is absent or empty.
    NoChainPayload,
    /// Nothing in the chain survived selection.
    NoCaCertificates,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::CredentialMissing => "credential deleted or not found",
            SkipReason::NotTls => "not a TLS record",
            SkipReason::NoMarker => "no export marker attribute",
            SkipReason::NoChainPayload => "no certificate payload",
            SkipReason::NoCaCertificates => "no CA certificates found",
        };
        f.write_str(reason)
    }
}

/// Result of one reconciliation pass that reached a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The derived bundle now matches the desired state.
    Converged(ConvergeOp),
    /// The trigger was irrelevant; nothing was changed.
    Skipped(SkipReason),
}

/// Stateless reconciliation controller.
///
/// Every pass is complete and independent: all state lives in the records
/// fetched from the store, so passes may be replayed or run concurrently for
/// different trigger keys without drift.
pub struct Reconciler<S> {
    store: Arc<S>,
}

impl<S> Clone for Reconciler<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: RecordStore> Reconciler<S> {
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Shared handle to the underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Run one reconciliation pass for `trigger`.
    ///
    /// Filters run in order and the first failing predicate ends the pass
    /// with a quiet [`Outcome::Skipped`]; anything not exactly matching the
    /// expected shape is ignored rather than escalated. Only the final
    /// convergence step mutates the store, and it is a full replace that is
    /// safe to re-run after a cancel-then-retry.
    pub async fn reconcile(&self, trigger: &RecordKey) -> Result<Outcome, ReconcileError> {
        debug!(record = %trigger, "reconciliation triggered");

        // Configuration is mandatory; even not-found escalates.
        let config = self
            .store
            .watch_config(&trigger.namespace, WATCH_CONFIG_NAME)
            .await
            .map_err(|source| ReconcileError::WatchConfig {
                key: RecordKey::new(trigger.namespace.clone(), WATCH_CONFIG_NAME),
                source,
            })?;

        let credential = match self
            .store
            .credential(&trigger.namespace, &trigger.name)
            .await
        {
            Ok(credential) => credential,
            Err(StoreError::NotFound(_)) => {
                return Ok(self.skip(trigger, SkipReason::CredentialMissing));
            }
            Err(source) => {
                return Err(ReconcileError::Credential {
                    key: trigger.clone(),
                    source,
                });
            }
        };

        if credential.record_type != RECORD_TYPE_TLS {
            return Ok(self.skip(trigger, SkipReason::NotTls));
        }
        if !credential.has_export_marker() {
            return Ok(self.skip(trigger, SkipReason::NoMarker));
        }
        let Some(chain) = credential.certificate_chain() else {
            return Ok(self.skip(trigger, SkipReason::NoChainPayload));
        };

        let retained: Vec<String> = select_chain(decode_chain(chain), config.check_ca).collect();
        if retained.is_empty() {
            return Ok(self.skip(trigger, SkipReason::NoCaCertificates));
        }

        let bundle = DerivedBundle::from_chain(trigger, &retained);
        let key = bundle.key.clone();
        let op = self
            .converge(bundle)
            .await
            .map_err(|source| ReconcileError::Converge {
                key: key.clone(),
                source,
            })?;

        info!(
            bundle = %key,
            operation = ?op,
            certificates = retained.len(),
            "CA bundle converged"
        );
        Ok(Outcome::Converged(op))
    }

    fn skip(&self, trigger: &RecordKey, reason: SkipReason) -> Outcome {
        debug!(record = %trigger, %reason, "reconciliation skipped");
        Outcome::Skipped(reason)
    }

    /// Idempotently make the stored bundle match `bundle`.
    ///
    /// Create first; a concurrent creator winning the race surfaces as
    /// `AlreadyExists` and falls through to a full-replace update instead of
    /// an error.
    async fn converge(&self, bundle: DerivedBundle) -> Result<ConvergeOp, StoreError> {
        match self.store.create_bundle(bundle.clone()).await {
            Ok(()) => Ok(ConvergeOp::Created),
            Err(StoreError::AlreadyExists(_)) => {
                self.store.update_bundle(bundle).await?;
                Ok(ConvergeOp::Updated)
            }
            Err(err) => Err(err),
        }
    }
}
