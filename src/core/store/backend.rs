//! Backend selection logic for the parameter store
//!
//! Determines which store the binary uses based on the compiled features.

use std::sync::Arc;

use super::{ParameterStore, Unavailable};
#[cfg(feature = "aws")]
use crate::error::StoreError;
#[cfg(feature = "aws")]
use tracing::warn;
use tracing::info;

/// Default backend selection
///
/// With the `aws` feature: SSM Parameter Store using the default AWS
/// credential chain.
/// Without it, or if the SSM client cannot be built: a store that fails
/// every call, so only environments with deferred secrets are affected.
pub fn default_backend() -> Arc<dyn ParameterStore> {
    #[cfg(feature = "aws")]
    let reason = match super::ssm::SsmStore::from_env() {
        Ok(store) => {
            info!("Using SSM parameter store backend");
            return Arc::new(store);
        }
        Err(e) => {
            warn!(error = %e, "Failed to initialize SSM backend");
            match e {
                StoreError::Unavailable(reason) => reason,
                other => other.to_string(),
            }
        }
    };
    #[cfg(not(feature = "aws"))]
    let reason = String::from("sst-bind was built without the `aws` feature");

    info!("No parameter store backend available");
    Arc::new(Unavailable::new(reason))
}
