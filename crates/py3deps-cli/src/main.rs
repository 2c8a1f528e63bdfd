//! # py3deps-cli
//!
//! Generates the Python 3 relations and byte-compile maintenance scripts of
//! a binary package from its scan statistics.
//!
//! This is the main entry point for the py3deps tool. It handles command
//! parsing, sets up logging and error reporting, and dispatches to the
//! command handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use py3deps_core::error::Py3DepsError;
use tracing::{debug, error};

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;

/// Python 3 dependency generator for Debian packages
#[derive(Parser)]
#[command(name = "py3deps", version, about = "Generate python3:Depends and rtupdate scripts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve relations for one binary package
    Resolve(commands::resolve::ResolveArgs),
    /// Show the interpreter policy in effect
    Policy {
        /// Interpreter defaults file
        #[arg(long, value_name = "FILE", default_value = py3deps_config::DEFAULTS_PATH)]
        defaults: camino::Utf8PathBuf,
    },
    /// Show version information
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    debug!("Starting py3deps v{}", env!("CARGO_PKG_VERSION"));

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        },
    }
}

fn run_cli(cli: Cli) -> anyhow::Result<()> {
    let ctx = CommandContext::new()?;
    commands::dispatch_command(cli.command, &ctx)
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "py3deps={level},py3deps_core={level},py3deps_config={level},py3deps_resolver={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("py3deps encountered an unexpected error: {}", panic_info);
        eprintln!("py3deps crashed! This is a bug.");
        eprintln!("Please report this at: https://github.com/py3deps/py3deps/issues");
        eprintln!("Error: {}", panic_info);
    }));
}

fn report_error(err: &anyhow::Error) {
    let formatter = ErrorFormatter::new();
    match err.downcast_ref::<Py3DepsError>() {
        Some(py3deps_error) => eprint!("{}", formatter.format_error(py3deps_error)),
        None => eprintln!("{}", formatter.format_simple(&format!("{:#}", err))),
    }
}
