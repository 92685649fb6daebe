//! In-memory parameter store.
//!
//! Holds parameters in a map and records every request it receives, so
//! tests can assert how many round trips a resolution made and what was in
//! each batch.

use std::collections::HashMap;
use std::sync::Mutex;

use super::{GetParameters, Parameter, ParameterStore, Parameters};
use crate::error::StoreError;

/// Parameter store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    parameters: HashMap<String, String>,
    failure: Option<(usize, StoreError)>,
    requests: Mutex<Vec<GetParameters>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Make every call fail with `error`.
    pub fn failing(error: StoreError) -> Self {
        Self::default().failing_after(0, error)
    }

    /// Answer the first `calls` requests, then fail every later one with
    /// `error`.
    pub fn failing_after(mut self, calls: usize, error: StoreError) -> Self {
        self.failure = Some((calls, error));
        self
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<GetParameters> {
        self.lock().clone()
    }

    /// Number of calls received so far.
    pub fn calls(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<GetParameters>> {
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl ParameterStore for MemoryStore {
    fn get_parameters(&self, request: &GetParameters) -> Result<Parameters, StoreError> {
        let call = {
            let mut requests = self.lock();
            requests.push(request.clone());
            requests.len()
        };

        if let Some((succeed, error)) = &self.failure {
            if call > *succeed {
                return Err(error.clone());
            }
        }

        let mut out = Parameters::default();
        for name in &request.names {
            match self.parameters.get(name) {
                Some(value) => out.found.push(Parameter::new(name.clone(), value.clone())),
                None => out.invalid.push(name.clone()),
            }
        }
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
