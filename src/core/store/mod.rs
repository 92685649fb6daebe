//! Parameter store access.
//!
//! The resolver only needs one operation: a batched get-by-name with
//! decryption. It is modelled as the [`ParameterStore`] trait so the AWS
//! backend can be swapped for a test double or another provider.
//!
//! ## Adding a New Store
//!
//! 1. Implement the `ParameterStore` trait
//! 2. Add the implementation in a new file (e.g., `vault.rs`)
//! 3. Feature-gate if it pulls in an SDK
//! 4. Re-export from this module
//!
//! ## Example
//!
//! ```ignore
//! struct Vault { /* ... */ }
//!
//! impl ParameterStore for Vault {
//!     fn get_parameters(&self, request: &GetParameters) -> Result<Parameters, StoreError> {
//!         // Look up every name in request.names
//!     }
//! }
//! ```

use crate::error::StoreError;

mod backend;
mod memory;
mod unavailable;

#[cfg(feature = "aws")]
pub mod ssm;

pub use backend::default_backend;
pub use memory::MemoryStore;
pub use unavailable::Unavailable;

/// One batched lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetParameters {
    /// Parameter names, at most the store's batch limit.
    pub names: Vec<String>,
    /// Return decrypted values for `SecureString` parameters.
    pub with_decryption: bool,
}

/// A parameter found by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub value: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Result of one batched lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    /// Parameters that exist, in the order the store returned them.
    pub found: Vec<Parameter>,
    /// Requested names that do not exist.
    pub invalid: Vec<String>,
}

/// Batched read access to a remote parameter store.
///
/// Errors are reported per call, never per name: a name that does not exist
/// belongs in [`Parameters::invalid`], not in an error.
pub trait ParameterStore: Send + Sync {
    /// Fetch every name in the request.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the call itself fails (network, auth,
    /// throttling, timeout).
    fn get_parameters(&self, request: &GetParameters) -> Result<Parameters, StoreError>;

    /// Backend name for logs and diagnostics.
    fn name(&self) -> &'static str;
}
