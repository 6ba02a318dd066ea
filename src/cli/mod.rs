//! cli
//!
//! Command-line interface for gitsim.
//!
//! # Responsibilities
//!
//! - Parse process arguments and install logging
//! - Load configuration and any saved state
//! - Read shell lines from stdin and dispatch them
//! - Does NOT mutate repository state directly
//!
//! # Architecture
//!
//! Every state change goes through [`crate::engine::Session`]. The shell
//! only parses lines, hands intents over, and prints the reports.

pub mod args;
pub mod commands;
pub mod shell;

pub use args::{Cli, ShellCommand, ShellLine};
pub use shell::{Flow, Shell};

use std::io::{self, IsTerminal};

use anyhow::{Context as _, Result};
use tracing_subscriber::EnvFilter;

use crate::core::config::Config;
use crate::core::snapshot::SnapshotStore;
use crate::engine::Session;
use crate::ui::output::Verbosity;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "GITSIM_LOG";

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.debug);

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;
    if let Some(path) = config.path() {
        tracing::debug!(path = %path.display(), "configuration loaded");
    }

    let mut session = Session::new(&config);
    if let Some(path) = &cli.state {
        session = session.with_store(SnapshotStore::new(path));
    }
    let loaded = match session.store() {
        Some(_) => session.load().context("failed to load saved state")?,
        None => false,
    };

    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    let stdin = io::stdin();
    let prompt = stdin.is_terminal() && verbosity != Verbosity::Quiet;
    let mut shell = Shell::new(session, verbosity).with_prompt(prompt);
    if !loaded {
        commands::print_welcome(&shell);
    }
    shell.run(stdin.lock())
}

/// Install the tracing subscriber.
///
/// The filter comes from `GITSIM_LOG`, defaulting to `warn`; `--debug`
/// overrides it with `debug`.
fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
