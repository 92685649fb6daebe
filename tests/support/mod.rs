//! Test support utilities for sst-bind integration tests.
//!
//! Provides environment fixtures and CLI helpers.

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use assert_cmd::Command;

/// An `sst-bind` invocation with a clean environment.
///
/// Nothing is inherited from the test process, so AWS credentials or SST
/// variables on the developer's machine cannot leak into the test.
pub struct Test {
    vars: Vec<(String, String)>,
}

impl Test {
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    /// Add an env var to every command.
    pub fn var(mut self, name: &str, value: &str) -> Self {
        self.vars.push((name.to_string(), value.to_string()));
        self
    }

    /// Create an `sst-bind` command with only the configured env vars.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("sst-bind").expect("failed to find sst-bind binary");
        cmd.env_clear();
        cmd.env("NO_COLOR", "1");
        for (k, v) in &self.vars {
            cmd.env(k, v);
        }
        cmd
    }
}

impl Default for Test {
    fn default() -> Self {
        Self::new()
    }
}
