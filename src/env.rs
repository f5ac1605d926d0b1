#![allow(clippy::module_name_repetitions)]
//! Read-only environment access and the allow-listed environment snapshot.
//!
//! Everything that consults variables goes through [`EnvSource`] so the resolver and the
//! snapshot filter can be driven by synthetic maps in tests. Empty values count as unset.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::{BTreeMap, HashMap};

/// Informational variables copied verbatim into the report, in report order.
pub const ENV_ALLOWLIST: &[&str] = &[
    "REPL_SLUG",
    "REPL_OWNER",
    "REPL_ID",
    "REPL_NAME",
    "REPL_LANGUAGE",
    "REPLIT_DB_URL",
    "REPLIT_CLUSTER",
    "LANG",
    "REPLIT_DEV_DOMAIN",
];

/// Key/value lookup over some environment. Implementations return `None` for
/// variables that are unset or set to the empty string.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;

    /// First variable in `keys` that has a value.
    fn first_var(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|k| self.var(k))
    }
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.is_empty())
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).filter(|v| !v.is_empty()).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).filter(|v| !v.is_empty()).cloned()
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

/// Allow-listed variables that were set when the snapshot was taken.
/// Serializes as a JSON object keeping allow-list order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentSnapshot {
    vars: Vec<(String, String)>,
}

impl EnvironmentSnapshot {
    pub fn capture<E: EnvSource + ?Sized>(env: &E, allowlist: &[&str]) -> Self {
        let mut vars: Vec<(String, String)> = Vec::new();
        for name in allowlist {
            if vars.iter().any(|(k, _)| k == name) {
                continue;
            }
            if let Some(value) = env.var(name) {
                vars.push(((*name).to_string(), value));
            }
        }
        Self { vars }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl Serialize for EnvironmentSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.vars.len()))?;
        for (k, v) in &self.vars {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
