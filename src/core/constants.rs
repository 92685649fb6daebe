//! Constants used throughout sst-bind.
//!
//! Centralizes the environment contract shared with the deploy tool.

/// Prefix of every binding env var (`SST_<Kind>_<property>_<id>`).
pub const BINDING_PREFIX: &str = "SST";

/// Separator between binding env var segments.
pub const BINDING_SEPARATOR: char = '_';

/// Construct kind of secrets.
pub const SECRET_KIND: &str = "Secret";

/// Value marking a secret that must be fetched from the parameter store.
pub const FETCH_FROM_SSM: &str = "__FETCH_FROM_SSM__";

/// Prefix marking a resource attribute that references a named secret.
pub const FETCH_FROM_SECRET_PREFIX: &str = "__FETCH_FROM_SECRET__:";

/// Env var prefix for plain parameters (`SST_Parameter_value_<name>`).
pub const PARAMETER_PREFIX: &str = "SST_Parameter_value_";

/// Env var holding the primary parameter path prefix.
pub const SSM_PREFIX_VAR: &str = "SST_SSM_PREFIX";

/// Env var holding the application name.
pub const APP_VAR: &str = "SST_APP";

/// Env var holding the deployment stage.
pub const STAGE_VAR: &str = "SST_STAGE";

/// Root of the fallback address space.
pub const FALLBACK_ROOT: &str = "sst";

/// Literal path segment marking a fallback address.
pub const FALLBACK_SEGMENT: &str = ".fallback";

/// Maximum names per `GetParameters` call. Hard limit of SSM.
pub const MAX_BATCH_SIZE: usize = 10;
