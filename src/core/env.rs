//! Environment snapshots and binding classification.
//!
//! The deploy tool injects one env var per resource attribute, named
//! `SST_<Kind>_<property>_<id>`. Values are decoded once here into a
//! [`BindingValue`] so nothing downstream does sentinel string checks.

use std::ffi::OsString;

use tracing::{debug, trace};

use crate::core::constants::{
    BINDING_PREFIX, BINDING_SEPARATOR, FETCH_FROM_SECRET_PREFIX, FETCH_FROM_SSM, SECRET_KIND,
};
use crate::core::types::SecretId;

/// A snapshot of environment variables.
///
/// Resolution works on snapshots so tests and embedders can supply their
/// own variables without touching the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    entries: Vec<(String, String)>,
}

impl Environment {
    /// Capture the current process environment.
    ///
    /// Entries that are not valid UTF-8 are skipped; the deploy tool never
    /// produces them.
    pub fn capture() -> Self {
        let entries: Vec<(String, String)> = std::env::vars_os()
            .filter_map(|(k, v)| Some((into_string(k)?, into_string(v)?)))
            .collect();
        trace!(count = entries.len(), "captured process environment");
        Self { entries }
    }

    /// Create from raw key-value pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Get a value by name. The last definition wins.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set a value, replacing any previous definition.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.entries.retain(|(k, _)| *k != name);
        self.entries.push((name, value.into()));
    }

    /// All entries in enumeration order.
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn into_string(s: OsString) -> Option<String> {
    s.into_string().ok()
}

/// Decoded value of a binding env var.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingValue {
    /// Plain value, used as is.
    Literal(String),
    /// `__FETCH_FROM_SSM__`: resolve from the parameter store.
    DeferredSecret,
    /// `__FETCH_FROM_SECRET__:<name>`: the value of the named secret.
    SecretReference(String),
}

impl BindingValue {
    pub fn parse(raw: &str) -> Self {
        if raw == FETCH_FROM_SSM {
            Self::DeferredSecret
        } else if let Some(name) = raw.strip_prefix(FETCH_FROM_SECRET_PREFIX) {
            Self::SecretReference(name.to_string())
        } else {
            Self::Literal(raw.to_string())
        }
    }
}

/// Parsed binding env var name: `SST_<kind>_<property>_<id>`.
///
/// The id is the remainder after the third separator, so ids may contain
/// underscores but properties and kinds may not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingName {
    pub kind: String,
    pub property: String,
    pub id: String,
}

impl BindingName {
    pub fn parse(name: &str) -> Option<Self> {
        let mut parts = name.splitn(4, BINDING_SEPARATOR);
        if parts.next()? != BINDING_PREFIX {
            return None;
        }
        let kind = parts.next()?;
        let property = parts.next()?;
        let id = parts.next()?;
        if kind.is_empty() || property.is_empty() || id.is_empty() {
            return None;
        }
        Some(Self {
            kind: kind.to_string(),
            property: property.to_string(),
            id: id.to_string(),
        })
    }

    /// Build the env var name for a binding.
    pub fn var_name(kind: &str, property: &str, id: &str) -> String {
        format!(
            "{BINDING_PREFIX}{BINDING_SEPARATOR}{kind}{BINDING_SEPARATOR}{property}{BINDING_SEPARATOR}{}",
            normalise_id(id)
        )
    }
}

/// Normalise a construct id for use in an env var name (`-` becomes `_`).
pub fn normalise_id(id: &str) -> String {
    id.replace('-', "_")
}

/// Deferred secret bindings as `(env var name, identity)` pairs.
pub fn deferred_secrets(env: &Environment) -> impl Iterator<Item = (&str, SecretId)> + '_ {
    env.entries()
        .iter()
        .filter(|(_, value)| BindingValue::parse(value) == BindingValue::DeferredSecret)
        .filter_map(|(name, _)| Some((name.as_str(), BindingName::parse(name)?)))
        .filter(|(_, binding)| binding.kind == SECRET_KIND)
        .map(|(name, binding)| (name, SecretId::new(binding.kind, binding.id, binding.property)))
}

/// Find every secret that must be fetched from the parameter store.
///
/// Returns identities in enumeration order. An environment without deferred
/// secrets yields an empty list.
pub fn scan_secrets(env: &Environment) -> Vec<SecretId> {
    let secrets: Vec<SecretId> = deferred_secrets(env).map(|(_, secret)| secret).collect();
    for secret in &secrets {
        trace!(secret = %secret, "found deferred secret");
    }
    debug!(count = secrets.len(), "scanned deferred secrets");
    secrets
}
