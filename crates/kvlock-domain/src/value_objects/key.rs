//! Store key value objects
//!
//! Fully-qualified store keys have the layout
//! `<environment>:<application>:<kind>:<logical-key>` so that deployments
//! and value kinds sharing one store never collide.

use crate::constants::KEY_SEPARATOR;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Kind of value stored under a namespaced key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyKind {
    /// Plain string values (lock records use this kind)
    String,
    /// Hash tables
    Hash,
    /// Lists
    List,
    /// Unordered sets
    Set,
    /// Sorted sets
    SortedSet,
}

impl KeyKind {
    /// All kinds, in declaration order
    pub const ALL: [KeyKind; 5] = [
        KeyKind::String,
        KeyKind::Hash,
        KeyKind::List,
        KeyKind::Set,
        KeyKind::SortedSet,
    ];

    /// Segment rendered into the store key
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Hash => "hash",
            Self::List => "list",
            Self::Set => "set",
            Self::SortedSet => "sorted_set",
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                Error::invalid_argument(format!(
                    "Unknown key kind '{s}'. Use string, hash, list, set or sorted_set"
                ))
            })
    }
}

/// Process-wide key namespace
///
/// Built once from configuration and handed to whoever needs to build keys.
/// Building a key is pure string concatenation and cannot fail.
///
/// # Example
///
/// ```
/// use kvlock_domain::{KeyKind, KeyNamespace};
///
/// let ns = KeyNamespace::new("prod", "billing");
/// assert_eq!(ns.build_key(KeyKind::String, "LOCK_KEY"), "prod:billing:string:LOCK_KEY");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyNamespace {
    environment: String,
    application_name: String,
}

impl KeyNamespace {
    /// Create a namespace for an environment and application
    pub fn new<E: Into<String>, A: Into<String>>(environment: E, application_name: A) -> Self {
        Self {
            environment: environment.into(),
            application_name: application_name.into(),
        }
    }

    /// Deployment environment segment
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Application name segment
    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    /// Build the fully-qualified key for a logical key of the given kind
    pub fn build_key(&self, kind: KeyKind, logical_key: &str) -> String {
        let mut key = String::with_capacity(
            self.environment.len()
                + self.application_name.len()
                + kind.as_str().len()
                + logical_key.len()
                + 3 * KEY_SEPARATOR.len(),
        );
        key.push_str(&self.environment);
        key.push_str(KEY_SEPARATOR);
        key.push_str(&self.application_name);
        key.push_str(KEY_SEPARATOR);
        key.push_str(kind.as_str());
        key.push_str(KEY_SEPARATOR);
        key.push_str(logical_key);
        key
    }

    /// Build fully-qualified keys for a batch of logical keys, preserving order
    pub fn build_keys<S: AsRef<str>>(&self, kind: KeyKind, logical_keys: &[S]) -> Vec<String> {
        logical_keys
            .iter()
            .map(|key| self.build_key(kind, key.as_ref()))
            .collect()
    }

    /// Re-key a map of logical keys to values
    pub fn build_key_map<T>(&self, kind: KeyKind, entries: HashMap<String, T>) -> HashMap<String, T> {
        entries
            .into_iter()
            .map(|(key, value)| (self.build_key(kind, &key), value))
            .collect()
    }

    /// Prefix shared by every key of the given kind in this namespace
    pub fn prefix(&self, kind: KeyKind) -> String {
        self.build_key(kind, "")
    }
}
