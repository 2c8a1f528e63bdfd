//! Scan statistics gathered from a package's file tree.
//!
//! These records are produced by the file scanner and consumed read-only by
//! the resolver. JSON shape:
//!
//! ```json
//! {
//!   "ext": ["3.5", "3.7"],
//!   "shebangs": [["python3", null], ["python3.6", "3.6"]],
//!   "compile": true,
//!   "private_dirs": { "/usr/share/foo": { "compile": true, "ext": [], "shebangs": [] } },
//!   "requires": ["debian/foo/usr/lib/python3/dist-packages/foo.egg-info/requires.txt"]
//! }
//! ```

use camino::Utf8PathBuf;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::Version;

/// Interpreter named in a shebang line, with its pinned version if any
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, Option<Version>)", into = "(String, Option<Version>)")]
pub struct Shebang {
    /// Interpreter as written, e.g. `python3` or `python3.6`
    pub interpreter: String,
    /// `None` for an unversioned `/usr/bin/python3` shebang
    pub version: Option<Version>,
}

/// Per-directory details for a private (off search path) directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateDirDetails {
    #[serde(default)]
    pub shebangs: Vec<Shebang>,
    #[serde(default)]
    pub compile: bool,
    #[serde(default)]
    pub ext: BTreeSet<Version>,
}

/// Everything the scanner observed about one binary package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStatistics {
    /// ABI versions of native extension modules
    #[serde(default)]
    pub ext: BTreeSet<Version>,
    /// Shebangs of top-level executables
    #[serde(default)]
    pub shebangs: Vec<Shebang>,
    /// Whether any public module needs byte-compilation at install time
    #[serde(default)]
    pub compile: bool,
    /// Private directories in the order the scanner found them
    #[serde(default)]
    pub private_dirs: IndexMap<String, PrivateDirDetails>,
    /// Third-party requirement declarations (`requires.txt`)
    #[serde(default, alias = "requires.txt")]
    pub requires: Vec<Utf8PathBuf>,
}

impl Shebang {
    pub fn new(interpreter: impl Into<String>, version: Option<Version>) -> Self {
        Self {
            interpreter: interpreter.into(),
            version,
        }
    }
}

impl From<(String, Option<Version>)> for Shebang {
    fn from((interpreter, version): (String, Option<Version>)) -> Self {
        Self {
            interpreter,
            version,
        }
    }
}

impl From<Shebang> for (String, Option<Version>) {
    fn from(shebang: Shebang) -> Self {
        (shebang.interpreter, shebang.version)
    }
}

impl ScanStatistics {
    /// Parse statistics from their JSON form
    pub fn from_json(content: &str) -> crate::Py3DepsResult<Self> {
        serde_json::from_str(content).map_err(|e| crate::Py3DepsError::JsonParse {
            message: e.to_string(),
        })
    }
}
