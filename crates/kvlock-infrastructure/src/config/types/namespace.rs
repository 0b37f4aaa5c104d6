//! Key namespace configuration

use crate::constants::*;
use kvlock_domain::KeyNamespace;
use serde::{Deserialize, Serialize};

/// Environment and application segments prefixed to every key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespaceConfig {
    /// Deployment environment (e.g. `dev`, `prod`)
    pub environment: String,

    /// Application name
    pub application_name: String,
}

impl NamespaceConfig {
    /// Build the domain namespace value
    pub fn to_namespace(&self) -> KeyNamespace {
        KeyNamespace::new(self.environment.clone(), self.application_name.clone())
    }
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.to_string(),
            application_name: DEFAULT_APPLICATION_NAME.to_string(),
        }
    }
}
