//! Record data model shared by the store and the controller.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Record type a credential must carry to be eligible for reconciliation.
pub const RECORD_TYPE_TLS: &str = "tls";

/// Marker attribute whose presence opts a credential into CA export.
pub const EXPORT_CA_ATTRIBUTE: &str = "certwatch.io/export-ca";

/// Payload field holding the concatenated PEM certificate chain.
pub const CERTIFICATE_CHAIN_KEY: &str = "certificate-chain";

/// Data field of the derived bundle holding the joined CA chain.
pub const CA_BUNDLE_KEY: &str = "ca.crt";

/// Suffix appended to the source name to form the derived bundle name.
pub const DERIVED_NAME_SUFFIX: &str = "-ca";

/// Namespace/name pair identifying a record.
///
/// Doubles as the trigger event payload: the trigger source delivers the key
/// of whichever record changed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordKey {
    pub namespace: String,
    pub name: String,
}

impl RecordKey {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Opaque TLS credential record, owned and mutated by an external issuer.
/// The controller only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub key: RecordKey,
    pub record_type: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub payload: BTreeMap<String, Vec<u8>>,
}

impl CredentialRecord {
    /// Whether the record carries the CA-export marker attribute. The
    /// attribute's value is ignored; presence alone opts the record in.
    #[must_use]
    pub fn has_export_marker(&self) -> bool {
        self.attributes.contains_key(EXPORT_CA_ATTRIBUTE)
    }

    /// The raw certificate-chain payload, if present and non-empty.
    #[must_use]
    pub fn certificate_chain(&self) -> Option<&[u8]> {
        self.payload
            .get(CERTIFICATE_CHAIN_KEY)
            .map(Vec::as_slice)
            .filter(|chain| !chain.is_empty())
    }
}

/// Derived configuration record carrying the republished CA bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedBundle {
    pub key: RecordKey,
    pub data: BTreeMap<String, String>,
}

impl DerivedBundle {
    /// Build the bundle for `source` from the retained PEM texts.
    ///
    /// The bundle lives in the source namespace under the source name plus
    /// the `-ca` suffix; `data["ca.crt"]` is the retained texts joined with a
    /// single newline, no leading or trailing separator.
    #[must_use]
    pub fn from_chain(source: &RecordKey, retained: &[String]) -> Self {
        let mut data = BTreeMap::new();
        data.insert(CA_BUNDLE_KEY.to_owned(), retained.join("\n"));

        Self {
            key: RecordKey::new(
                source.namespace.clone(),
                format!("{}{}", source.name, DERIVED_NAME_SUFFIX),
            ),
            data,
        }
    }

    /// The joined CA bundle text.
    #[must_use]
    pub fn ca_bundle(&self) -> &str {
        self.data
            .get(CA_BUNDLE_KEY)
            .map(String::as_str)
            .unwrap_or_default()
    }
}
