//! Environment and store fixtures.

use std::sync::Arc;

use sst_bind::core::cache::SecretCache;
use sst_bind::core::env::Environment;
use sst_bind::core::store::MemoryStore;

pub const PREFIX: &str = "/sst/my-app/prod/";
pub const APP: &str = "my-app";
pub const STAGE: &str = "prod";

/// Environment for `my-app` on stage `prod` with the given deferred secrets.
pub fn deployed(secrets: &[&str]) -> Environment {
    let mut env = Environment::from_pairs([
        ("SST_SSM_PREFIX", PREFIX),
        ("SST_APP", APP),
        ("SST_STAGE", STAGE),
    ]);
    for id in secrets {
        env.set(format!("SST_Secret_value_{}", id), "__FETCH_FROM_SSM__");
    }
    env
}

/// Primary path of a secret in `deployed` environments.
pub fn primary(id: &str) -> String {
    format!("{}Secret/{}/value", PREFIX, id)
}

/// Fallback path of a secret in `deployed` environments.
pub fn fallback(id: &str) -> String {
    format!("/sst/{}/.fallback/Secret/{}/value", APP, id)
}

/// A cache over `env` backed by `store`.
pub fn cache(store: &Arc<MemoryStore>, env: Environment) -> SecretCache {
    SecretCache::with_environment(store.clone(), env)
}
