//! # py3deps-core
//!
//! Core types shared across all py3deps crates.
//!
//! This crate provides:
//! - Interpreter `Version` and `VersionRange` types with range parsing and formatting
//! - Structured package `Relation` constraints and their Debian rendering
//! - Scan statistics, resolver options and interpreter policy records
//! - `Py3DepsError` enum for unified error handling
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (Version, Relation, ScanStatistics, etc.)
//! - `error`: Error types and result aliases

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{Py3DepsError, Py3DepsResult};
pub use types::{
    Comparator, InterpreterPolicy, PrivateDirDetails, Relation, RelationKind, ResolverOptions,
    ScanStatistics, Shebang, Version, VersionRange,
};
