//! Per-namespace watch configuration.

use serde::{Deserialize, Serialize};

/// Conventional name of the effective watch configuration in a namespace.
pub const WATCH_CONFIG_NAME: &str = "default";

/// Operator-facing knobs for one namespace's reconciliation.
///
/// Created and updated by an operator outside the core; the controller only
/// reads it, and refuses to run without it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// When true, only blocks independently verified as CA certificates are
    /// retained; when false every decoded block in the chain is retained.
    #[serde(default)]
    pub check_ca: bool,
}
