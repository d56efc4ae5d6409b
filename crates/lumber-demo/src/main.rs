//! Demo binary entrypoint.
//!
//! Builds a registry, replays the reference session through console (or
//! alert) targets and prints a summary.

mod cli;
mod scenario;

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use lumber_core::{AlertTarget, ConsoleTarget, Registry, RegistryConfig, SharedTarget};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => RegistryConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => RegistryConfig::default(),
    };

    let console = || ConsoleTarget::new().with_backtraces(!cli.no_backtrace);
    let registry = Registry::builder().config(config).trace_console(console()).build();

    let first: SharedTarget = Arc::new(console());
    let second: SharedTarget = if cli.alerts {
        Arc::new(AlertTarget::new())
    } else {
        Arc::clone(&first)
    };

    let tally = scenario::replay(&registry, first, second, cli.raise_to);

    let mut stdout = io::stdout().lock();
    writeln!(
        stdout,
        "recorded {} / traced {} / filtered {} / rejected {} (target failures: {})",
        tally.recorded,
        tally.traced,
        tally.filtered,
        tally.rejected,
        registry.target_failures()
    )?;
    if cli.history {
        writeln!(stdout, "{}", registry.log().to_json()?)?;
    }
    Ok(())
}
