//! sst-bind - Runtime resolution of SST resource bindings and secrets.
//!
//! At deploy time SST injects one env var per resource attribute. Secrets
//! are injected as a placeholder and fetched from SSM Parameter Store on
//! first use, first under the stage-scoped path and then under the app-wide
//! fallback path.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! └── core/             # Core library components
//!     ├── env           # Environment snapshots, binding classification
//!     ├── config        # SST_SSM_PREFIX / SST_APP / SST_STAGE
//!     ├── path          # Primary and fallback parameter paths
//!     ├── store/        # Parameter store backends
//!     │   ├── mod       # ParameterStore trait
//!     │   ├── memory    # In-memory store for tests
//!     │   └── ssm       # AWS SSM (feature `aws`)
//!     ├── batch         # Chunked GetParameters lookups
//!     ├── cache         # Process-lifetime secret cache
//!     └── binding       # Resource and parameter bindings
//! ```
//!
//! # Example
//!
//! ```no_run
//! use sst_bind::core::binding::{QueueResources, Resources};
//! use sst_bind::core::cache::SecretCache;
//! use sst_bind::core::env::Environment;
//! use sst_bind::core::store::default_backend;
//!
//! # fn main() -> sst_bind::error::Result<()> {
//! let secrets = SecretCache::new(default_backend());
//! let stripe_key = secrets.get_one("STRIPE_KEY")?;
//!
//! let queue = QueueResources::from_env(&Environment::capture(), &secrets, "Jobs")?;
//! println!("{} {}", queue.queue_url, stripe_key.len());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod error;
