//! Parameter path encoding.
//!
//! A [`SecretId`] lives at one of two addresses in the parameter store:
//!
//! ```text
//! primary:  <SST_SSM_PREFIX><kind>/<id>/<property>
//! fallback: /sst/<SST_APP>/.fallback/<kind>/<id>/<property>
//! ```
//!
//! Each address space has its own encoder/decoder pair. The decoders are not
//! interchangeable.

use crate::core::config::Settings;
use crate::core::constants::{FALLBACK_ROOT, FALLBACK_SEGMENT};
use crate::core::types::{ParameterPath, SecretId};

/// Encodes and decodes parameter paths for one app and stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathCodec {
    prefix: String,
    app: String,
}

impl PathCodec {
    pub fn new(prefix: impl Into<String>, app: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            app: app.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.ssm_prefix.clone(), settings.app.clone())
    }

    /// Stage-scoped path under the configured prefix.
    pub fn encode_primary(&self, secret: &SecretId) -> ParameterPath {
        format!(
            "{}{}/{}/{}",
            self.prefix, secret.kind, secret.id, secret.property
        )
    }

    /// Recover the identity from a primary path.
    ///
    /// Returns `None` if the path is missing the prefix or does not have
    /// exactly three segments after it.
    pub fn decode_primary(&self, path: &str) -> Option<SecretId> {
        let rest = path.strip_prefix(self.prefix.as_str())?;
        let mut parts = rest.split('/');
        let kind = parts.next()?;
        let id = parts.next()?;
        let property = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        Some(SecretId::new(kind, id, property))
    }

    /// App-scoped, stage-independent path.
    pub fn encode_fallback(&self, secret: &SecretId) -> ParameterPath {
        format!(
            "/{FALLBACK_ROOT}/{}/{FALLBACK_SEGMENT}/{}/{}/{}",
            self.app, secret.kind, secret.id, secret.property
        )
    }

    /// Recover the identity from a fallback path.
    ///
    /// Reads the kind, id and property from segments four to six, counting
    /// the empty segment before the leading slash.
    pub fn decode_fallback(&self, path: &str) -> Option<SecretId> {
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() != 7 {
            return None;
        }
        Some(SecretId::new(parts[4], parts[5], parts[6]))
    }
}
