//! In-process record store backed by concurrent maps.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::{RecordStore, StoreError};
use crate::config::WatchConfig;
use crate::record::{CredentialRecord, DerivedBundle, RecordKey};

/// In-memory [`RecordStore`].
///
/// Backs tests and single-process embeddings. Create and update enforce the
/// `AlreadyExists`/`NotFound` contract atomically through the map entry API,
/// so concurrent reconcilers observe the same races a remote store would
/// produce.
#[derive(Debug, Default)]
pub struct MemoryStore {
    configs: DashMap<RecordKey, WatchConfig>,
    credentials: DashMap<RecordKey, CredentialRecord>,
    bundles: DashMap<RecordKey, DerivedBundle>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed or replace a namespace's watch configuration.
    pub fn put_watch_config(&self, namespace: &str, name: &str, config: WatchConfig) {
        self.configs.insert(RecordKey::new(namespace, name), config);
    }

    /// Seed or replace a credential record, as an external issuer would.
    pub fn put_credential(&self, credential: CredentialRecord) {
        self.credentials.insert(credential.key.clone(), credential);
    }

    /// Remove a credential record, as an external deletion would.
    pub fn remove_credential(&self, namespace: &str, name: &str) {
        self.credentials.remove(&RecordKey::new(namespace, name));
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn watch_config(&self, namespace: &str, name: &str) -> Result<WatchConfig, StoreError> {
        let key = RecordKey::new(namespace, name);
        self.configs
            .get(&key)
            .map(|entry| *entry.value())
            .ok_or(StoreError::NotFound(key))
    }

    async fn credential(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<CredentialRecord, StoreError> {
        let key = RecordKey::new(namespace, name);
        self.credentials
            .get(&key)
            .map(|entry| entry.value().clone())
            .ok_or(StoreError::NotFound(key))
    }

    async fn bundle(&self, namespace: &str, name: &str) -> Result<DerivedBundle, StoreError> {
        let key = RecordKey::new(namespace, name);
        self.bundles
            .get(&key)
            .map(|entry| entry.value().clone())
            .ok_or(StoreError::NotFound(key))
    }

    async fn create_bundle(&self, bundle: DerivedBundle) -> Result<(), StoreError> {
        match self.bundles.entry(bundle.key.clone()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists(bundle.key)),
            Entry::Vacant(slot) => {
                slot.insert(bundle);
                Ok(())
            }
        }
    }

    async fn update_bundle(&self, bundle: DerivedBundle) -> Result<(), StoreError> {
        match self.bundles.entry(bundle.key.clone()) {
            Entry::Occupied(mut slot) => {
                slot.insert(bundle);
                Ok(())
            }
            Entry::Vacant(_) => Err(StoreError::NotFound(bundle.key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(namespace: &str, name: &str, content: &str) -> DerivedBundle {
        DerivedBundle::from_chain(
            &RecordKey::new(namespace, name.trim_end_matches("-ca")),
            &[content.to_owned()],
        )
    }

    #[tokio::test]
    async fn create_twice_reports_already_exists() {
        let store = MemoryStore::new();
        let first = bundle("edge", "gateway-tls-ca", "pem");

        store
            .create_bundle(first.clone())
            .await
            .expect("first create succeeds");
        let err = store
            .create_bundle(first)
            .await
            .expect_err("second create must fail");
        assert!(matches!(err, StoreError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn update_of_missing_bundle_reports_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update_bundle(bundle("edge", "gateway-tls-ca", "pem"))
            .await
            .expect_err("update of missing bundle must fail");
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn update_replaces_content_in_full() {
        let store = MemoryStore::new();
        store
            .create_bundle(bundle("edge", "gateway-tls-ca", "old"))
            .await
            .expect("create");
        store
            .update_bundle(bundle("edge", "gateway-tls-ca", "new"))
            .await
            .expect("update");

        let stored = store
            .bundle("edge", "gateway-tls-ca")
            .await
            .expect("bundle present");
        assert_eq!(stored.ca_bundle(), "new");
    }
}
