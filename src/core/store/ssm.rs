//! AWS Systems Manager Parameter Store backend.
//!
//! Enable with `--features aws`.
//!
//! Uses AWS credentials from the environment (AWS_ACCESS_KEY_ID, etc.)
//! or from the default credential provider chain. Calls block the current
//! thread on a private tokio runtime, so do not call into this store from
//! inside an async runtime.

use std::time::Duration;

use aws_sdk_ssm::error::DisplayErrorContext;
use tracing::trace;

use super::{GetParameters, Parameter, ParameterStore, Parameters};
use crate::error::StoreError;

/// SSM parameter store.
pub struct SsmStore {
    runtime: tokio::runtime::Runtime,
    client: aws_sdk_ssm::Client,
    timeout: Option<Duration>,
}

impl SsmStore {
    /// Create a store from the default AWS configuration.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the runtime cannot be created.
    pub fn from_env() -> Result<Self, StoreError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| StoreError::Unavailable(format!("failed to create runtime: {}", e)))?;

        let config =
            runtime.block_on(aws_config::load_defaults(aws_config::BehaviorVersion::latest()));
        let client = aws_sdk_ssm::Client::new(&config);

        Ok(Self {
            runtime,
            client,
            timeout: None,
        })
    }

    /// Bound each `GetParameters` call. Unbounded by default.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl std::fmt::Debug for SsmStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SsmStore")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ParameterStore for SsmStore {
    fn get_parameters(&self, request: &GetParameters) -> Result<Parameters, StoreError> {
        trace!(
            names = request.names.len(),
            with_decryption = request.with_decryption,
            "calling ssm:GetParameters"
        );

        let call = self
            .client
            .get_parameters()
            .set_names(Some(request.names.clone()))
            .with_decryption(request.with_decryption)
            .send();

        let output = self.runtime.block_on(async {
            let result = match self.timeout {
                Some(limit) => tokio::time::timeout(limit, call)
                    .await
                    .map_err(|_| StoreError::Timeout)?,
                None => call.await,
            };
            result.map_err(|e| StoreError::Request(DisplayErrorContext(&e).to_string()))
        })?;

        let found = output
            .parameters()
            .iter()
            .filter_map(|p| Some(Parameter::new(p.name()?, p.value()?)))
            .collect::<Vec<_>>();
        let invalid = output.invalid_parameters().to_vec();

        trace!(
            found = found.len(),
            invalid = invalid.len(),
            "ssm:GetParameters returned"
        );
        Ok(Parameters { found, invalid })
    }

    fn name(&self) -> &'static str {
        "ssm"
    }
}
