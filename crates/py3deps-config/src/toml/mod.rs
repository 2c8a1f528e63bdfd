//! py3deps.toml configuration parsing and serialization

use std::collections::BTreeSet;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use py3deps_core::error::Py3DepsError;
use py3deps_core::types::{InterpreterPolicy, ResolverOptions, Version, VersionRange};

use crate::ConfigResult;

/// Complete py3deps.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Py3DepsToml {
    /// Interpreter policy overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<PolicySection>,

    /// Resolver options
    #[serde(default)]
    pub options: OptionsSection,
}

/// Interpreter policy overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PolicySection {
    /// Baseline interpreter version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_version: Option<Version>,

    /// Versions still allowed as `pythonX.Y` dependencies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_versions: Option<BTreeSet<Version>>,
}

/// Resolver options section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OptionsSection {
    /// Version window, e.g. "3.5-" or ">= 3.5, << 3.8"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vrange: Option<String>,

    /// Translate requires.txt files into Depends
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guess_deps: Option<bool>,

    #[serde(default)]
    pub depends: Vec<String>,

    #[serde(default)]
    pub recommends: Vec<String>,

    #[serde(default)]
    pub suggests: Vec<String>,

    /// Byte-compilation exclusion patterns
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl PolicySection {
    /// Apply the overrides on top of a base policy
    pub fn apply(&self, base: InterpreterPolicy) -> InterpreterPolicy {
        let default_version = self.default_version.unwrap_or(base.default_version);
        let supported_versions = self
            .supported_versions
            .clone()
            .unwrap_or(base.supported_versions);
        InterpreterPolicy::new(default_version, supported_versions)
    }
}

impl OptionsSection {
    /// Parsed version window, `None` when unset or unbounded
    pub fn vrange(&self) -> ConfigResult<Option<VersionRange>> {
        match &self.vrange {
            Some(vrange) => {
                VersionRange::parse(vrange).map_err(|e| Py3DepsError::version(vrange.clone(), e))
            },
            None => Ok(None),
        }
    }

    /// Apply the section on top of base options; lists are appended
    pub fn apply(&self, mut base: ResolverOptions) -> ConfigResult<ResolverOptions> {
        if self.vrange.is_some() {
            base.vrange = self.vrange()?;
        }
        if let Some(guess_deps) = self.guess_deps {
            base.guess_deps = guess_deps;
        }
        base.depends.extend(self.depends.iter().cloned());
        base.recommends.extend(self.recommends.iter().cloned());
        base.suggests.extend(self.suggests.iter().cloned());
        base.regexpr.extend(self.exclude.iter().cloned());
        Ok(base)
    }
}

/// Parse TOML string to Py3DepsToml configuration
pub fn parse_py3deps_toml(content: &str) -> ConfigResult<Py3DepsToml> {
    let config: Py3DepsToml = ::toml::from_str(content).map_err(|e| {
        let (line, column) = e
            .span()
            .map(|span| line_column(content, span.start))
            .unwrap_or((0, 0));
        Py3DepsError::TomlParse {
            message: e.message().to_string(),
            line,
            column,
        }
    })?;

    validate_config(&config)?;

    Ok(config)
}

/// Serialize Py3DepsToml to TOML string
pub fn serialize_py3deps_toml(config: &Py3DepsToml) -> ConfigResult<String> {
    ::toml::to_string_pretty(config).map_err(|e| Py3DepsError::ConfigValidation {
        field: "config".to_string(),
        reason: format!("TOML serialization error: {}", e),
    })
}

/// Validate configuration completeness
pub fn validate_config(config: &Py3DepsToml) -> ConfigResult<()> {
    config.options.vrange()?;

    if let Some(policy) = &config.policy {
        if let (Some(default), Some(supported)) = (&policy.default_version, &policy.supported_versions) {
            if !supported.contains(default) {
                return Err(Py3DepsError::ConfigValidation {
                    field: "policy.supported-versions".to_string(),
                    reason: format!("default version {} is not in the supported set", default),
                });
            }
        }
    }

    for pattern in &config.options.exclude {
        if pattern.is_empty() {
            return Err(Py3DepsError::ConfigValidation {
                field: "options.exclude".to_string(),
                reason: "exclusion patterns must not be empty".to_string(),
            });
        }
    }

    Ok(())
}

/// Load and parse py3deps.toml from file path
pub fn load_from_file(path: &Utf8Path) -> ConfigResult<Py3DepsToml> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Py3DepsError::io(format!("Failed to read {}", path), e))?;

    parse_py3deps_toml(&content).map_err(|e| match e {
        Py3DepsError::ConfigValidation { field, reason } => Py3DepsError::ConfigValidation {
            field,
            reason: format!("In file {}: {}", path, reason),
        },
        other => other,
    })
}

/// 1-based line and column of a byte offset
fn line_column(content: &str, offset: usize) -> (usize, usize) {
    let before = &content[..offset.min(content.len())];
    let line = before.matches('\n').count() + 1;
    let column = before.rfind('\n').map_or(before.len(), |nl| before.len() - nl - 1) + 1;
    (line, column)
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_line_column_within_content(content in "[a-z\n]{0,64}", offset in 0usize..80) {
            let (line, column) = line_column(&content, offset);
            prop_assert!(line >= 1 && column >= 1);
            prop_assert!(line <= content.matches('\n').count() + 1);
        }

        #[test]
        fn test_vrange_option_accepts_ordered_bounds(min in 0u32..20, span in 0u32..20) {
            let section = OptionsSection {
                vrange: Some(format!("3.{}-3.{}", min, min + span)),
                ..Default::default()
            };
            let parsed = section.vrange().unwrap();
            prop_assert_eq!(
                parsed,
                Some(VersionRange::new(Some(Version::new(3, min)), Some(Version::new(3, min + span))))
            );
        }
    }
}
