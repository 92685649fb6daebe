//! Domain types shared across the resolution pipeline.

use std::collections::BTreeMap;
use std::fmt;

/// Resolved secrets keyed by construct id.
pub type SecretMap = BTreeMap<String, String>;

/// A remote parameter path, primary or fallback.
pub type ParameterPath = String;

/// Logical identity of one secret value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SecretId {
    /// Construct kind, always `Secret` for scanned secrets.
    pub kind: String,
    /// Construct id, the logical name given by the application.
    pub id: String,
    /// Property name, e.g. `value`.
    pub property: String,
}

impl SecretId {
    pub fn new(kind: impl Into<String>, id: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
            property: property.into(),
        }
    }
}

impl fmt::Display for SecretId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.kind, self.id, self.property)
    }
}
