//! Dependency generation engine for Python 3 packages
//!
//! This crate computes the Depends/Recommends/Suggests relations a binary
//! package must declare from what its files use, and the byte-compile
//! maintenance scripts each private directory needs.

pub mod engine;
pub mod export;
pub mod pydist;
pub mod relations;

// Re-export main types
pub use engine::DependencyResolver;
pub use export::Substvars;
pub use pydist::{PyDist, RequirementTranslator};
pub use relations::{MaintenanceScript, MetadataSink, OrderedSet, RelationSet};
