//! Process-lifetime secret cache.
//!
//! [`SecretCache`] owns the parameter store handle and the resolved secrets.
//! The first access scans the environment for deferred secrets, looks them
//! up under their primary paths, retries anything missing under the
//! fallback paths, and commits the result. Later accesses are served from
//! memory until [`SecretCache::reset`] is called.
//!
//! The whole scan, resolve and commit sequence runs under one lock, so the
//! store is queried by at most one thread at a time and no caller ever sees
//! a partially built map. Failed passes commit nothing; the next access runs
//! the pipeline again.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::core::batch;
use crate::core::config::Settings;
use crate::core::env::{scan_secrets, Environment};
use crate::core::path::PathCodec;
use crate::core::store::ParameterStore;
use crate::core::types::{ParameterPath, SecretMap};
use crate::error::{Result, SecretError, StoreError};

/// Where resolution passes read their environment from.
#[derive(Clone)]
enum Source {
    Process,
    Snapshot(Environment),
}

impl Source {
    fn label(&self) -> &'static str {
        match self {
            Self::Process => "process",
            Self::Snapshot(_) => "snapshot",
        }
    }

    fn environment(&self) -> Environment {
        match self {
            Self::Process => Environment::capture(),
            Self::Snapshot(env) => env.clone(),
        }
    }
}

struct State {
    store: Arc<dyn ParameterStore>,
    secrets: Option<SecretMap>,
}

/// Resolves deferred secrets once and serves them from memory afterwards.
pub struct SecretCache {
    source: Source,
    state: Mutex<State>,
}

impl SecretCache {
    /// Create a cache that scans the process environment.
    pub fn new(store: Arc<dyn ParameterStore>) -> Self {
        Self::build(store, Source::Process)
    }

    /// Create a cache that scans a fixed environment snapshot.
    pub fn with_environment(store: Arc<dyn ParameterStore>, env: Environment) -> Self {
        Self::build(store, Source::Snapshot(env))
    }

    fn build(store: Arc<dyn ParameterStore>, source: Source) -> Self {
        Self {
            source,
            state: Mutex::new(State {
                store,
                secrets: None,
            }),
        }
    }

    /// All secrets, keyed by construct id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if a store call fails, or
    /// `SecretError::Unresolved` naming every secret found under neither
    /// its primary nor its fallback path.
    pub fn get_all(&self) -> Result<SecretMap> {
        self.with_secrets(SecretMap::clone)
    }

    /// A single secret by construct id.
    ///
    /// # Errors
    ///
    /// Returns any error from [`SecretCache::get_all`], or
    /// `SecretError::NotFound` if resolution succeeded without defining
    /// `name`.
    pub fn get_one(&self, name: &str) -> Result<String> {
        self.with_secrets(|secrets| secrets.get(name).cloned())?
            .ok_or_else(|| SecretError::NotFound(name.to_string()).into())
    }

    /// Drop the cached secrets and swap the store.
    ///
    /// Used by tests and after credential rotation.
    pub fn reset(&self, store: Arc<dyn ParameterStore>) {
        let mut state = self.lock();
        debug!(store = store.name(), "resetting secret cache");
        state.store = store;
        state.secrets = None;
    }

    /// Whether a resolved map is currently committed.
    pub fn is_cached(&self) -> bool {
        self.lock().secrets.is_some()
    }

    fn with_secrets<R>(&self, f: impl FnOnce(&SecretMap) -> R) -> Result<R> {
        let mut state = self.lock();

        if let Some(secrets) = &state.secrets {
            return Ok(f(secrets));
        }

        let env = self.source.environment();
        let secrets = load(state.store.as_ref(), &env)?;
        let result = f(&secrets);
        state.secrets = Some(secrets);
        Ok(result)
    }

    // A pass that fails commits nothing, so a poisoned lock still guards a
    // consistent state.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for SecretCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("SecretCache")
            .field("source", &self.source.label())
            .field("store", &state.store.name())
            .field("cached", &state.secrets.as_ref().map(|s| s.len()))
            .finish()
    }
}

/// Run one full resolution pass.
fn load(store: &dyn ParameterStore, env: &Environment) -> Result<SecretMap> {
    let secrets = scan_secrets(env);
    if secrets.is_empty() {
        debug!("no deferred secrets in environment");
        return Ok(SecretMap::new());
    }

    let settings = Settings::from_env(env);
    let codec = PathCodec::from_settings(&settings);

    let primary: Vec<ParameterPath> = secrets.iter().map(|s| codec.encode_primary(s)).collect();
    let first = batch::resolve(store, &primary)?;

    let mut values = SecretMap::new();
    for (path, value) in first.resolved {
        let secret = codec
            .decode_primary(&path)
            .ok_or(StoreError::MalformedName(path))?;
        values.insert(secret.id, value);
    }

    if first.unresolved.is_empty() {
        debug!(count = values.len(), "resolved secrets from primary paths");
        return Ok(values);
    }

    let fallback = first
        .unresolved
        .iter()
        .map(|path| {
            codec
                .decode_primary(path)
                .map(|secret| codec.encode_fallback(&secret))
                .ok_or_else(|| StoreError::MalformedName(path.clone()))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    debug!(
        resolved = values.len(),
        missing = fallback.len(),
        "retrying missing secrets under fallback paths"
    );
    let second = batch::resolve(store, &fallback)?;

    if !second.unresolved.is_empty() {
        let mut missing: Vec<String> = second
            .unresolved
            .iter()
            .map(|path| {
                codec
                    .decode_fallback(path)
                    .or_else(|| codec.decode_primary(path))
                    .map(|secret| secret.id)
                    .unwrap_or_else(|| path.clone())
            })
            .collect();
        missing.sort();
        missing.dedup();

        warn!(stage = %settings.stage, missing = ?missing, "secrets are not set");
        return Err(SecretError::Unresolved {
            stage: settings.stage,
            missing,
        }
        .into());
    }

    // Fallback values are merged over the primary ones, so secrets that
    // resolved on the first pass are kept.
    for (path, value) in second.resolved {
        let secret = codec
            .decode_fallback(&path)
            .ok_or(StoreError::MalformedName(path))?;
        values.insert(secret.id, value);
    }

    debug!(count = values.len(), "resolved secrets with fallbacks");
    Ok(values)
}
