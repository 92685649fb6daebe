//! Run command.
//!
//! Executes a command with every deferred secret replaced by its resolved
//! value, so the child reads plain env vars and never calls the store.

use std::collections::BTreeMap;

use zeroize::Zeroizing;

use crate::cli::Context;
use crate::core::env::deferred_secrets;
use crate::error::Result;

/// Run a command with resolved secrets injected.
pub fn execute(ctx: &Context, command: &[String]) -> Result<()> {
    let exit_code = run_with_secrets(ctx, command)?;
    std::process::exit(exit_code);
}

fn run_with_secrets(ctx: &Context, command: &[String]) -> Result<i32> {
    let Some((program, args)) = command.split_first() else {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "no command specified",
        )
        .into());
    };

    // Use Zeroizing to ensure secrets are wiped from memory after use
    let secrets: BTreeMap<String, Zeroizing<String>> = ctx
        .secrets()
        .get_all()?
        .into_iter()
        .map(|(id, value)| (id, Zeroizing::new(value)))
        .collect();

    let mut cmd = std::process::Command::new(program);
    cmd.args(args);

    for (var, secret) in deferred_secrets(&ctx.env) {
        if let Some(value) = secrets.get(&secret.id) {
            cmd.env(var, value.as_str());
        }
    }

    let status = cmd.status()?;
    // Signal-terminated processes have no code
    Ok(status.code().unwrap_or(1))
}
