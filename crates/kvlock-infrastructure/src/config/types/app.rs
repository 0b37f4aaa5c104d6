//! Main application configuration

use super::{LockConfig, LoggingConfig, NamespaceConfig, StoreConfig};
use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Key namespace segments
    #[serde(default)]
    pub namespace: NamespaceConfig,

    /// Backing store selection
    #[serde(default)]
    pub store: StoreConfig,

    /// Lock defaults used when a caller does not pass its own values
    #[serde(default)]
    pub lock: LockConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}
