//! sst-bind - Inspect SST resource bindings and secrets.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sst_bind::cli::output;
use sst_bind::cli::{execute, suggestion, Cli};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("SST_BIND_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("sst_bind=debug")
        } else {
            EnvFilter::new("sst_bind=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
        .init();

    if let Err(e) = execute(cli.command) {
        output::error(&e.to_string());
        if let Some(hint) = suggestion(&e) {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}
