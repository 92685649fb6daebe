//! Core library components.
//!
//! This module contains the resolution pipeline: environment scanning, path
//! encoding, batched store lookups, the secret cache, and resource binding.

pub mod batch;
pub mod binding;
pub mod cache;
pub mod config;
pub mod constants;
pub mod env;
pub mod path;
pub mod store;
pub mod types;
