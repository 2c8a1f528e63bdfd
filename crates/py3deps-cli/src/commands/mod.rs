//! Command implementations and dispatch logic.
//!
//! This module contains all command handlers and the central dispatch system.
//! Each command is a function that takes a CommandContext.

use std::collections::HashMap;

use camino::{Utf8Path, Utf8PathBuf};
use py3deps_core::error::Py3DepsError;
use tracing::info;

pub mod resolve;


use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext {
    pub cwd: Utf8PathBuf,
    /// `PY3DEPS_*` environment overrides captured at startup
    pub env: HashMap<String, String>,
    pub output: OutputHandler,
}

impl CommandContext {
    /// Create a new command context
    pub fn new() -> anyhow::Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| Py3DepsError::Io {
            message: "Failed to get current directory".to_string(),
            source: e,
        })?;
        let cwd = Utf8PathBuf::try_from(cwd)
            .map_err(|e| anyhow::anyhow!("Working directory is not valid UTF-8: {}", e))?;

        let env = py3deps_config::ConfigLayering::collect_env_overrides();
        let output = OutputHandler::new();

        Ok(Self { cwd, env, output })
    }
}

/// Dispatch a command to its handler
pub fn dispatch_command(command: Commands, ctx: &CommandContext) -> anyhow::Result<()> {
    match command {
        Commands::Resolve(args) => {
            info!("Resolving dependencies for {}", args.package);
            resolve::execute(args, ctx)
        },
        Commands::Policy { defaults } => show_policy(&defaults, ctx),
        Commands::Version => show_version(ctx),
    }
}

fn show_policy(defaults: &Utf8Path, ctx: &CommandContext) -> anyhow::Result<()> {
    let policy = py3deps_config::load_policy(defaults)?;
    let supported: Vec<String> = policy
        .supported_versions
        .iter()
        .map(|v| v.to_string())
        .collect();

    ctx.output.print(&format!("default-version = {}", policy.default_version));
    ctx.output.print(&format!("supported-versions = {}", supported.join(", ")));
    Ok(())
}

fn show_version(ctx: &CommandContext) -> anyhow::Result<()> {
    let target = format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS);

    ctx.output.print(&format!("py3deps v{}", env!("CARGO_PKG_VERSION")));
    ctx.output.info(&format!("Built: {}", env!("BUILD_DATE")));
    ctx.output.info(&format!("Target: {}", target));
    ctx.output.info(&format!("Rust: {}", env!("RUSTC_VERSION")));

    Ok(())
}
