//! Configuration layering, fallback logic, and environment overrides

use std::collections::HashMap;

use camino::Utf8PathBuf;
use tracing::debug;

use py3deps_core::error::Py3DepsError;
use py3deps_core::types::{InterpreterPolicy, ResolverOptions, Version, VersionRange};

use crate::{toml::Py3DepsToml, ConfigResult};

/// Name of the project configuration file
pub const CONFIG_FILE: &str = "py3deps.toml";

/// Main configuration loading interface
pub struct ConfigLoader {
    /// Current working directory
    cwd: Utf8PathBuf,
}

/// Configuration layering and merging
pub struct ConfigLayering;

/// Configuration source tracking
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Explicit --config path
    Explicit(Utf8PathBuf),
    /// py3deps.toml found in the working directory or a parent
    Project(Utf8PathBuf),
}

/// Values given as command line flags (highest priority)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub vrange: Option<String>,
    pub guess_deps: bool,
    pub depends: Vec<String>,
    pub recommends: Vec<String>,
    pub suggests: Vec<String>,
    pub exclude: Vec<String>,
}

/// Final policy and options for one run
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub policy: InterpreterPolicy,
    pub options: ResolverOptions,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new(cwd: Utf8PathBuf) -> Self {
        Self { cwd }
    }

    /// Load project configuration, preferring an explicit path
    pub fn load_project_config(
        &self,
        explicit: Option<Utf8PathBuf>,
    ) -> ConfigResult<Option<(Py3DepsToml, ConfigSource)>> {
        if let Some(path) = explicit {
            let config = crate::toml::load_from_file(&path)?;
            return Ok(Some((config, ConfigSource::Explicit(path))));
        }

        match self.resolve_config_path(CONFIG_FILE) {
            Some(path) => {
                debug!("using project configuration {}", path);
                let config = crate::toml::load_from_file(&path)?;
                Ok(Some((config, ConfigSource::Project(path))))
            },
            None => Ok(None),
        }
    }

    /// Find configuration file in project (walks up directory tree)
    pub fn resolve_config_path(&self, filename: &str) -> Option<Utf8PathBuf> {
        let mut current = Some(self.cwd.as_path());

        while let Some(dir) = current {
            let config_path = dir.join(filename);
            if config_path.exists() {
                return Some(config_path);
            }
            current = dir.parent();
        }

        None
    }
}

impl ConfigLayering {
    /// Merge all layers: defaults file, project config, environment, CLI flags
    pub fn merge_configs(
        base_policy: InterpreterPolicy,
        project_config: Option<Py3DepsToml>,
        env_overrides: HashMap<String, String>,
        cli_overrides: &CliOverrides,
    ) -> ConfigResult<ResolvedConfig> {
        let mut policy = base_policy;
        let mut options = ResolverOptions::default();

        if let Some(config) = project_config {
            if let Some(section) = &config.policy {
                policy = section.apply(policy);
            }
            options = config.options.apply(options)?;
        }

        Self::apply_env_overrides(&mut policy, &mut options, &env_overrides)?;

        Self::apply_cli_overrides(&mut options, cli_overrides)?;

        Ok(ResolvedConfig { policy, options })
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(
        policy: &mut InterpreterPolicy,
        options: &mut ResolverOptions,
        overrides: &HashMap<String, String>,
    ) -> ConfigResult<()> {
        for (key, value) in overrides {
            match key.as_str() {
                "PY3DEPS_VRANGE" => {
                    options.vrange = parse_vrange(key, value)?;
                },
                "PY3DEPS_GUESS_DEPS" => {
                    options.guess_deps = parse_flag(key, value)?;
                },
                "PY3DEPS_DEFAULT_VERSION" => {
                    let version: Version = value
                        .parse()
                        .map_err(|e| Py3DepsError::version(value.clone(), e))?;
                    policy.default_version = version;
                },
                _ => {
                    // Unknown environment variable, ignore
                },
            }
        }

        Ok(())
    }

    /// Apply CLI flag overrides
    fn apply_cli_overrides(options: &mut ResolverOptions, overrides: &CliOverrides) -> ConfigResult<()> {
        if let Some(vrange) = &overrides.vrange {
            options.vrange = parse_vrange("--vrange", vrange)?;
        }
        if overrides.guess_deps {
            options.guess_deps = true;
        }
        options.depends.extend(overrides.depends.iter().cloned());
        options.recommends.extend(overrides.recommends.iter().cloned());
        options.suggests.extend(overrides.suggests.iter().cloned());
        options.regexpr.extend(overrides.exclude.iter().cloned());

        Ok(())
    }

    /// Collect environment variable overrides
    pub fn collect_env_overrides() -> HashMap<String, String> {
        std::env::vars()
            .filter(|(key, _)| key.starts_with("PY3DEPS_"))
            .collect()
    }
}

fn parse_vrange(source: &str, value: &str) -> ConfigResult<Option<VersionRange>> {
    VersionRange::parse(value).map_err(|e| {
        debug!("invalid version range from {}: {}", source, value);
        Py3DepsError::version(value, e)
    })
}

fn parse_flag(field: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(Py3DepsError::ConfigValidation {
            field: field.to_string(),
            reason: format!("expected a boolean, got '{}'", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toml::{OptionsSection, PolicySection};
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    fn v(major: u32, minor: u32) -> Version {
        Version::new(major, minor)
    }

    fn project_config() -> Py3DepsToml {
        Py3DepsToml {
            policy: Some(PolicySection {
                default_version: Some(v(3, 6)),
                supported_versions: None,
            }),
            options: OptionsSection {
                vrange: Some("3.5-".to_string()),
                depends: vec!["python3-bar".to_string()],
                exclude: vec!["*.pyc".to_string()],
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_resolve_config_path_walks_up() {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let nested = root.join("debian").join("tmp");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.join(CONFIG_FILE), "[options]\nguess-deps = true\n").unwrap();

        let loader = ConfigLoader::new(nested);
        assert_eq!(loader.resolve_config_path(CONFIG_FILE), Some(root.join(CONFIG_FILE)));

        let (config, source) = loader.load_project_config(None).unwrap().unwrap();
        assert_eq!(config.options.guess_deps, Some(true));
        assert!(matches!(source, ConfigSource::Project(_)));
    }

    #[test]
    fn test_explicit_config_path() {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let path = root.join("custom.toml");
        std::fs::write(&path, "[options]\nvrange = \"3.6\"\n").unwrap();

        let loader = ConfigLoader::new(root);
        let (config, source) = loader.load_project_config(Some(path.clone())).unwrap().unwrap();
        assert_eq!(config.options.vrange.as_deref(), Some("3.6"));
        assert_eq!(source, ConfigSource::Explicit(path));
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let loader = ConfigLoader::new(Utf8PathBuf::from("/"));
        let result = loader.load_project_config(Some(Utf8PathBuf::from("/nonexistent/py3deps.toml")));
        assert!(matches!(result, Err(Py3DepsError::Io { .. })));
    }

    #[test]
    fn test_merge_configs() {
        let env_overrides = HashMap::from([
            ("PY3DEPS_GUESS_DEPS".to_string(), "yes".to_string()),
            ("PY3DEPS_UNRELATED".to_string(), "ignored".to_string()),
        ]);
        let cli_overrides = CliOverrides {
            vrange: Some("3.5-3.8".to_string()),
            depends: vec!["python3-baz".to_string()],
            ..Default::default()
        };

        let merged = ConfigLayering::merge_configs(
            InterpreterPolicy::new(v(3, 4), BTreeSet::from([v(3, 4), v(3, 6)])),
            Some(project_config()),
            env_overrides,
            &cli_overrides,
        )
        .unwrap();

        // project policy overrides the defaults file, supported set is kept
        assert_eq!(merged.policy.default_version, v(3, 6));
        assert!(merged.policy.is_supported(&v(3, 4)));

        // CLI flag wins over the project window
        assert_eq!(
            merged.options.vrange,
            Some(VersionRange::new(Some(v(3, 5)), Some(v(3, 8))))
        );
        assert!(merged.options.guess_deps);
        assert_eq!(merged.options.depends, vec!["python3-bar", "python3-baz"]);
        assert_eq!(merged.options.regexpr, vec!["*.pyc"]);
    }

    #[test]
    fn test_env_vrange_dash_clears_window() {
        let env_overrides = HashMap::from([("PY3DEPS_VRANGE".to_string(), "-".to_string())]);

        let merged = ConfigLayering::merge_configs(
            InterpreterPolicy::default(),
            Some(project_config()),
            env_overrides,
            &CliOverrides::default(),
        )
        .unwrap();

        assert_eq!(merged.options.vrange, None);
    }

    #[test]
    fn test_invalid_env_values() {
        let bad_flag = HashMap::from([("PY3DEPS_GUESS_DEPS".to_string(), "sometimes".to_string())]);
        assert!(ConfigLayering::merge_configs(
            InterpreterPolicy::default(),
            None,
            bad_flag,
            &CliOverrides::default()
        )
        .is_err());

        let bad_version = HashMap::from([("PY3DEPS_DEFAULT_VERSION".to_string(), "3".to_string())]);
        assert!(ConfigLayering::merge_configs(
            InterpreterPolicy::default(),
            None,
            bad_version,
            &CliOverrides::default()
        )
        .is_err());
    }

    #[test]
    fn test_collect_env_overrides() {
        std::env::set_var("PY3DEPS_TEST_COLLECT", "1");
        std::env::set_var("NOT_PY3DEPS_VAR", "ignored");

        let overrides = ConfigLayering::collect_env_overrides();

        assert!(overrides.contains_key("PY3DEPS_TEST_COLLECT"));
        assert!(!overrides.contains_key("NOT_PY3DEPS_VAR"));

        std::env::remove_var("PY3DEPS_TEST_COLLECT");
        std::env::remove_var("NOT_PY3DEPS_VAR");
    }
}
