//! Resolver options supplied by the operator.

use serde::{Deserialize, Serialize};

use super::VersionRange;

/// Options controlling one resolution pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolverOptions {
    /// Explicitly requested interpreter version window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vrange: Option<VersionRange>,

    /// Translate `requires.txt` files into Depends
    #[serde(default)]
    pub guess_deps: bool,

    /// Free-form Depends entries
    #[serde(default)]
    pub depends: Vec<String>,

    /// Free-form Recommends entries
    #[serde(default)]
    pub recommends: Vec<String>,

    /// Free-form Suggests entries
    #[serde(default)]
    pub suggests: Vec<String>,

    /// Filename patterns excluded from byte-compilation
    #[serde(default, alias = "exclude")]
    pub regexpr: Vec<String>,
}

impl ResolverOptions {
    /// Set the version window, treating an unbounded range as none
    pub fn with_vrange(mut self, vrange: VersionRange) -> Self {
        self.vrange = if vrange.is_unbounded() { None } else { Some(vrange) };
        self
    }

    /// Add a byte-compilation exclusion pattern
    pub fn with_exclude(mut self, pattern: impl Into<String>) -> Self {
        self.regexpr.push(pattern.into());
        self
    }
}
