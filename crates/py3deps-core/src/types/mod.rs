//! Core data types for Python 3 dependency generation.
//!
//! This module provides the fundamental types used throughout py3deps:
//! - Interpreter versions and version windows
//! - Structured package relations
//! - Scan statistics, resolver options and interpreter policy

pub mod options;
pub mod policy;
pub mod relation;
pub mod stats;
pub mod version;

// Re-export all public types
pub use options::ResolverOptions;
pub use policy::InterpreterPolicy;
pub use relation::{Comparator, Relation, RelationKind};
pub use stats::{PrivateDirDetails, ScanStatistics, Shebang};
pub use version::{Version, VersionError, VersionRange};
