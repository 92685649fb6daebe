//! Command-line interface.

pub mod bindings;
pub mod completions;
pub mod output;
pub mod run;
pub mod secrets;

use std::sync::OnceLock;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::core::binding::SecretLookup;
use crate::core::cache::SecretCache;
use crate::core::env::Environment;
use crate::core::store::default_backend;
use crate::error::{Error, SecretError, StoreError};

/// sst-bind - Inspect SST resource bindings and secrets.
#[derive(Parser)]
#[command(
    name = "sst-bind",
    about = "Resolve SST resource bindings and secrets from the environment",
    version
)]
pub struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// List all secrets bound to this environment
    Secrets {
        /// Print values instead of masking them
        #[arg(long)]
        show: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a secret value
    Secret {
        /// Secret name (construct id)
        name: String,
    },

    /// List all parameters
    Parameters {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a parameter value
    Parameter {
        /// Parameter name
        name: String,
    },

    /// Print the attributes of a bound resource
    Resource {
        /// Resource kind
        #[arg(value_enum)]
        kind: ResourceKind,
        /// Resource name (construct id)
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a command with deferred secrets replaced by their values
    Run {
        /// Command and arguments to run
        #[arg(trailing_var_arg = true, required = true)]
        command: Vec<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Resource kinds that can be bound.
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum ResourceKind {
    Function,
    Bucket,
    Queue,
    Topic,
    EventBus,
    Rds,
    Table,
}

/// Process environment and secret cache shared by every command.
///
/// The cache, and with it the parameter store client, is only built the
/// first time a command asks for secrets.
pub struct Context {
    pub env: Environment,
    secrets: OnceLock<SecretCache>,
}

impl Context {
    /// Capture the process environment. The default store is connected
    /// lazily.
    pub fn from_process() -> Self {
        Self {
            env: Environment::capture(),
            secrets: OnceLock::new(),
        }
    }

    /// Use `env` and an already built cache.
    pub fn new(env: Environment, secrets: SecretCache) -> Self {
        Self {
            env,
            secrets: OnceLock::from(secrets),
        }
    }

    /// The secret cache, connecting the default store on first use.
    pub fn secrets(&self) -> &SecretCache {
        self.secrets
            .get_or_init(|| SecretCache::with_environment(default_backend(), self.env.clone()))
    }

    /// Whether any command has asked for secrets yet.
    pub fn secrets_connected(&self) -> bool {
        self.secrets.get().is_some()
    }
}

impl SecretLookup for Context {
    fn secret(&self, name: &str) -> crate::error::Result<String> {
        self.secrets().get_one(name)
    }
}

/// Follow-up advice printed under an error, if there is any.
pub fn suggestion(err: &Error) -> Option<String> {
    match err {
        Error::Secret(SecretError::Unresolved { stage, missing }) => Some(format!(
            "run: npx sst secrets set {} <value> --stage {}",
            missing.first().map(String::as_str).unwrap_or("<NAME>"),
            stage
        )),
        Error::Store(StoreError::Unavailable(_)) if cfg!(feature = "aws") => {
            Some("check the AWS credentials and region for this environment".to_string())
        }
        Error::Store(StoreError::Unavailable(_)) => {
            Some("rebuild with: cargo install sst-bind --features aws".to_string())
        }
        _ => None,
    }
}

/// Execute a CLI command.
pub fn execute(command: Command) -> crate::error::Result<()> {
    use Command::*;

    // Completions need neither the environment nor a store.
    let command = match command {
        Completions { shell } => return completions::execute(shell),
        other => other,
    };

    let ctx = Context::from_process();
    match command {
        Secrets { show, json } => secrets::list(&ctx, show, json),
        Secret { name } => secrets::get(&ctx, &name),
        Parameters { json } => bindings::parameters(&ctx, json),
        Parameter { name } => bindings::parameter(&ctx, &name),
        Resource { kind, name, json } => bindings::resource(&ctx, kind, &name, json),
        Run { command } => run::execute(&ctx, &command),
        Completions { shell } => completions::execute(shell),
    }
}
