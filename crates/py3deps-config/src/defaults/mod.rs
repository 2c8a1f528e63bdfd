//! Interpreter defaults file (`debian_defaults`)
//!
//! The file is INI-style:
//!
//! ```text
//! [DEFAULT]
//! # the default python3 version
//! default-version = python3.4
//! # all supported python3 versions
//! supported-versions = python3.4, python3.5
//! ```

use std::collections::BTreeSet;

use camino::Utf8Path;
use tracing::{debug, info};

use py3deps_core::error::Py3DepsError;
use py3deps_core::types::{InterpreterPolicy, Version};

use crate::ConfigResult;

/// System location of the interpreter defaults file
pub const DEFAULTS_PATH: &str = "/usr/share/python3/debian_defaults";

/// Parse `debian_defaults` content into an interpreter policy
///
/// A missing `default-version` falls back to the built-in default; missing
/// `supported-versions` means only the default version is supported.
pub fn parse_debian_defaults(content: &str) -> ConfigResult<InterpreterPolicy> {
    let mut default_version = None;
    let mut supported_versions = None;

    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') || line.starts_with('[') {
            continue;
        }

        let Some((key, value)) = line.split_once('=').or_else(|| line.split_once(':')) else {
            return Err(Py3DepsError::ConfigValidation {
                field: "debian_defaults".to_string(),
                reason: format!("line {} is not a key = value pair: {}", lineno + 1, line),
            });
        };

        match key.trim() {
            "default-version" => {
                default_version = Some(parse_interpreter(value)?);
            },
            "supported-versions" => {
                let versions = value
                    .split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(parse_interpreter)
                    .collect::<ConfigResult<BTreeSet<Version>>>()?;
                supported_versions = Some(versions);
            },
            _ => {
                // old-versions, unsupported-versions: not needed for dependency generation
            },
        }
    }

    let default_version = default_version.unwrap_or(InterpreterPolicy::default().default_version);
    let supported_versions = supported_versions.unwrap_or_else(|| BTreeSet::from([default_version]));

    Ok(InterpreterPolicy::new(default_version, supported_versions))
}

/// Load the interpreter policy, falling back to built-in values when the file is absent
pub fn load_policy(path: &Utf8Path) -> ConfigResult<InterpreterPolicy> {
    if !path.exists() {
        info!("{} not found, using built-in interpreter defaults", path);
        return Ok(InterpreterPolicy::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Py3DepsError::io(format!("Failed to read {}", path), e))?;

    let policy = parse_debian_defaults(&content).map_err(|e| match e {
        Py3DepsError::ConfigValidation { field, reason } => Py3DepsError::ConfigValidation {
            field,
            reason: format!("In file {}: {}", path, reason),
        },
        other => other,
    })?;

    debug!(
        "interpreter policy from {}: default {}, supported {:?}",
        path, policy.default_version, policy.supported_versions
    );
    Ok(policy)
}

fn parse_interpreter(value: &str) -> ConfigResult<Version> {
    let value = value.trim();
    Version::from_interpreter_name(value).map_err(|e| Py3DepsError::version(value, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[DEFAULT]
# the default python3 version
default-version = python3.6
# all supported python3 versions
supported-versions = python3.6, python3.7
# formerly supported python3 versions
old-versions = python3.1, python3.2, python3.3, python3.4, python3.5
# unsupported versions, including older versions
unsupported-versions = python3.1, python3.2, python3.3, python3.4, python3.5
"#;

    #[test]
    fn test_parse_sample_defaults() {
        let policy = parse_debian_defaults(SAMPLE).unwrap();
        assert_eq!(policy.default_version, Version::new(3, 6));
        assert!(policy.is_supported(&Version::new(3, 7)));
        assert!(!policy.is_supported(&Version::new(3, 5)));
    }

    #[test]
    fn test_missing_keys_use_builtin_default() {
        let policy = parse_debian_defaults("[DEFAULT]\n").unwrap();
        assert_eq!(policy, InterpreterPolicy::default());

        let policy = parse_debian_defaults("default-version = python3.9").unwrap();
        assert_eq!(policy.supported_versions, BTreeSet::from([Version::new(3, 9)]));
    }

    #[test]
    fn test_invalid_lines_are_rejected() {
        assert!(matches!(
            parse_debian_defaults("default-version python3.6"),
            Err(Py3DepsError::ConfigValidation { .. })
        ));
        assert!(matches!(
            parse_debian_defaults("default-version = pypy3"),
            Err(Py3DepsError::InvalidVersion { .. })
        ));
    }

    #[test]
    fn test_load_policy_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let path = Utf8PathBuf::try_from(file.path().to_path_buf()).unwrap();

        let policy = load_policy(&path).unwrap();
        assert_eq!(policy.default_version, Version::new(3, 6));
    }

    #[test]
    fn test_load_policy_missing_file() {
        let policy = load_policy(Utf8Path::new("/nonexistent/debian_defaults")).unwrap();
        assert_eq!(policy, InterpreterPolicy::default());
    }
}
