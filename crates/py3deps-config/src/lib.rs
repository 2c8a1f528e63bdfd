//! Configuration loading for py3deps
//!
//! This crate reads the interpreter defaults file and the optional
//! py3deps.toml, and layers environment and command line overrides on top
//! to produce the InterpreterPolicy and ResolverOptions for a run.

pub mod defaults;
pub mod merge;
pub mod toml;

// Re-export main types
pub use self::defaults::{load_policy, parse_debian_defaults, DEFAULTS_PATH};
pub use self::merge::{CliOverrides, ConfigLayering, ConfigLoader, ConfigSource, ResolvedConfig};
pub use self::toml::{OptionsSection, PolicySection, Py3DepsToml};

use py3deps_core::error::Py3DepsError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, Py3DepsError>;
