//! Error types.
//!
//! One top-level [`Error`] with a domain enum per concern. Library functions
//! return [`Result`] and convert domain errors with `?`.

use thiserror::Error;

/// Top-level error for all sst-bind operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error(transparent)]
    Binding(#[from] BindingError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures talking to the remote parameter store.
///
/// Raised per batched call, never per name. Not retried internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("parameter store request failed: {0}")]
    Request(String),

    #[error("parameter store request timed out")]
    Timeout,

    #[error("parameter store unavailable: {0}")]
    Unavailable(String),

    #[error("parameter store returned an unrecognised name: {0}")]
    MalformedName(String),
}

/// Failures resolving secrets after the store calls succeeded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SecretError {
    #[error("the following secrets are not set in the {stage} stage: {}", missing.join(", "))]
    Unresolved { stage: String, missing: Vec<String> },

    #[error("no secret set with name {0}")]
    NotFound(String),
}

/// Failures reading resource bindings from the environment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    #[error("required env var {var} not set for {kind} {id}")]
    MissingVariable { var: String, kind: String, id: String },

    #[error("env var {var} defers to the parameter store but is not a secret binding")]
    UnexpectedDeferred { var: String },

    #[error("parameter {0} is not set")]
    ParameterNotSet(String),
}

pub type Result<T> = std::result::Result<T, Error>;
