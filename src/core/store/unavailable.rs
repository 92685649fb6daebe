//! Store used when no backend is compiled in.

use super::{GetParameters, ParameterStore, Parameters};
use crate::error::StoreError;

/// Fails every call with [`StoreError::Unavailable`].
///
/// Environments without deferred secrets never call the store, so resource
/// bindings and parameters still work without a backend.
#[derive(Debug, Clone)]
pub struct Unavailable {
    reason: String,
}

impl Unavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl ParameterStore for Unavailable {
    fn get_parameters(&self, _request: &GetParameters) -> Result<Parameters, StoreError> {
        Err(StoreError::Unavailable(self.reason.clone()))
    }

    fn name(&self) -> &'static str {
        "unavailable"
    }
}
