//! Interpreter policy: which Python 3 versions are default and supported.
//!
//! Normally loaded from `/usr/share/python3/debian_defaults` by py3deps-config;
//! the built-in values are used when that file is unavailable.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Relation, Version};

/// Lowest python3 package shipping the byte-compile and clean helpers
pub const MIN_PYCOMPILE_VERSION: &str = "3.2.3-3~";

/// Default and supported interpreter versions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct InterpreterPolicy {
    /// Baseline version ABI ranges are judged against
    pub default_version: Version,
    /// Versions that may still appear as `pythonX.Y` dependencies
    pub supported_versions: BTreeSet<Version>,
}

impl InterpreterPolicy {
    pub fn new(default_version: Version, supported_versions: BTreeSet<Version>) -> Self {
        Self {
            default_version,
            supported_versions,
        }
    }

    /// Check if a shebang-pinned version is still supported
    pub fn is_supported(&self, version: &Version) -> bool {
        self.supported_versions.contains(version)
    }

    /// Dependency guaranteeing the byte-compile maintenance helpers exist
    pub fn compile_dependency() -> Relation {
        Relation::at_least("python3", MIN_PYCOMPILE_VERSION)
    }
}

impl Default for InterpreterPolicy {
    fn default() -> Self {
        let default_version = Version::new(3, 4);
        Self {
            default_version,
            supported_versions: BTreeSet::from([default_version]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = InterpreterPolicy::default();
        assert_eq!(policy.default_version, Version::new(3, 4));
        assert!(policy.is_supported(&Version::new(3, 4)));
        assert!(!policy.is_supported(&Version::new(2, 7)));
    }

    #[test]
    fn test_compile_dependency() {
        assert_eq!(
            InterpreterPolicy::compile_dependency().to_string(),
            "python3 (>= 3.2.3-3~)"
        );
    }
}
