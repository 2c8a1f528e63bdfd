//! py3deps benchmarking suite
//!
//! Benchmarks for relation generation and for parsing the resolver's inputs.

pub mod common;

pub use common::*;
