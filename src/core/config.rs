//! Runtime settings.
//!
//! The deploy tool describes where secrets live through a handful of env
//! vars. They are read on every resolution pass rather than once at startup
//! so the codec always agrees with the environment being scanned.

use tracing::debug;

use crate::core::constants::{APP_VAR, SSM_PREFIX_VAR, STAGE_VAR};
use crate::core::env::Environment;

/// Settings read from `SST_SSM_PREFIX`, `SST_APP` and `SST_STAGE`.
///
/// Unset variables read as empty strings, matching how the deploy tool
/// treats them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Prefix of primary parameter paths, e.g. `/sst/my-app/prod/`.
    pub ssm_prefix: String,
    /// Application name used in fallback paths.
    pub app: String,
    /// Deployment stage, only used in error messages.
    pub stage: String,
}

impl Settings {
    /// Read settings from an environment snapshot.
    pub fn from_env(env: &Environment) -> Self {
        let settings = Self {
            ssm_prefix: env.get(SSM_PREFIX_VAR).unwrap_or_default().to_string(),
            app: env.get(APP_VAR).unwrap_or_default().to_string(),
            stage: env.get(STAGE_VAR).unwrap_or_default().to_string(),
        };
        debug!(
            ssm_prefix = %settings.ssm_prefix,
            app = %settings.app,
            stage = %settings.stage,
            "loaded settings"
        );
        settings
    }
}
