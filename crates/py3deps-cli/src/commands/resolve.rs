//! `py3deps resolve`: scan statistics in, substvars and rtupdate scripts out.

use std::io::Read;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use tracing::debug;

use py3deps_config::{CliOverrides, ConfigLayering, ConfigLoader};
use py3deps_core::error::Py3DepsError;
use py3deps_core::types::ScanStatistics;
use py3deps_resolver::{DependencyResolver, RelationSet, Substvars};

use super::CommandContext;

/// Arguments of the resolve command
#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Binary package name (a `-dbg` suffix selects python3-dbg bounds)
    #[arg(short, long)]
    pub package: String,

    /// Scan statistics JSON, `-` for stdin
    #[arg(long, value_name = "FILE")]
    pub stats: Utf8PathBuf,

    /// Project configuration (default: nearest py3deps.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Interpreter defaults file
    #[arg(long, value_name = "FILE", default_value = py3deps_config::DEFAULTS_PATH)]
    pub defaults: Utf8PathBuf,

    /// Interpreter version window, e.g. 3.5- or 3.5-3.8
    #[arg(long, value_name = "RANGE")]
    pub vrange: Option<String>,

    /// Translate requires.txt files into Depends
    #[arg(long)]
    pub guess_deps: bool,

    /// Extra Depends entry (repeatable)
    #[arg(long = "depends", value_name = "REQ")]
    pub depends: Vec<String>,

    /// Extra Recommends entry (repeatable)
    #[arg(long = "recommends", value_name = "REQ")]
    pub recommends: Vec<String>,

    /// Extra Suggests entry (repeatable)
    #[arg(long = "suggests", value_name = "REQ")]
    pub suggests: Vec<String>,

    /// Exclude files matching PATTERN from byte-compilation (repeatable)
    #[arg(short = 'X', long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Substvars file to update (default: print to stdout)
    #[arg(long, value_name = "FILE")]
    pub substvars: Option<Utf8PathBuf>,

    /// Print the resolved relation set as JSON instead
    #[arg(long)]
    pub json: bool,
}

impl ResolveArgs {
    fn cli_overrides(&self) -> CliOverrides {
        CliOverrides {
            vrange: self.vrange.clone(),
            guess_deps: self.guess_deps,
            depends: self.depends.clone(),
            recommends: self.recommends.clone(),
            suggests: self.suggests.clone(),
            exclude: self.exclude.clone(),
        }
    }
}

/// Run the resolve command
pub fn execute(args: ResolveArgs, ctx: &CommandContext) -> anyhow::Result<()> {
    let relations = resolve_package(&args, ctx)?;

    if args.json {
        let json = serde_json::to_string_pretty(&relations)
            .context("Failed to serialize relation set")?;
        ctx.output.print(&json);
        return Ok(());
    }

    let mut substvars = Substvars::new();
    match &args.substvars {
        Some(path) => {
            if path.exists() {
                let existing = std::fs::read_to_string(path)
                    .map_err(|e| Py3DepsError::io(format!("Failed to read {}", path), e))?;
                substvars.merge_existing(&args.package, &existing);
            }
            relations.export(&mut substvars);
            std::fs::write(path, substvars.render(&args.package))
                .map_err(|e| Py3DepsError::io(format!("Failed to write {}", path), e))?;
            ctx.output.success(&format!("Updated {}", path));
        },
        None => {
            relations.export(&mut substvars);
            ctx.output.print(substvars.render(&args.package).trim_end());
        },
    }

    for line in substvars.render_rtupdates(&args.package).lines() {
        ctx.output.step("rtupdate", line);
    }

    Ok(())
}

/// Load every input layer and run the resolver
pub fn resolve_package(args: &ResolveArgs, ctx: &CommandContext) -> anyhow::Result<RelationSet> {
    let base_policy = py3deps_config::load_policy(&args.defaults)?;
    let project = ConfigLoader::new(ctx.cwd.clone())
        .load_project_config(args.config.clone())?
        .map(|(config, source)| {
            debug!("configuration source: {:?}", source);
            config
        });

    let config = ConfigLayering::merge_configs(
        base_policy,
        project,
        ctx.env.clone(),
        &args.cli_overrides(),
    )?;

    let stats = read_stats(&args.stats)?;

    let resolver = DependencyResolver::new(config.policy);
    Ok(resolver.resolve(&args.package, &stats, &config.options))
}

pub(crate) fn read_stats(path: &Utf8Path) -> anyhow::Result<ScanStatistics> {
    let content = if path.as_str() == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| Py3DepsError::io("Failed to read statistics from stdin".to_string(), e))?;
        content
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| Py3DepsError::io(format!("Failed to read {}", path), e))?
    };

    Ok(ScanStatistics::from_json(&content)?)
}
