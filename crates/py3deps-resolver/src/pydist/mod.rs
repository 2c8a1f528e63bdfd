//! Third-party requirement translation
//!
//! Turns upstream requirement declarations (`requires.txt` lines, PEP 508
//! strings handed in by the operator) into Debian package relations. The
//! resolver only sees the `RequirementTranslator` contract: neither
//! operation ever fails, the worst case is an empty list or the input
//! handed back unchanged.

use std::collections::HashMap;

use camino::Utf8Path;
use tracing::{debug, info, warn};

use py3deps_core::types::{Comparator, Relation};

/// Prefix of Debian binary packages shipping Python 3 distributions
const PACKAGE_PREFIX: &str = "python3-";

/// Requirement translation used by the resolver
pub trait RequirementTranslator {
    /// Parse a requirement file into relation strings; unreadable files yield nothing
    fn parse_requirements_file(&self, path: &Utf8Path) -> Vec<String>;

    /// Best-effort translation of one free-form requirement
    fn guess_constraint(&self, raw: &str) -> String;
}

/// Heuristic translator with optional explicit name overrides
#[derive(Debug, Clone, Default)]
pub struct PyDist {
    /// Normalised distribution name -> Debian package name
    overrides: HashMap<String, String>,
}

/// Parsed `name[extras] op version, ...` requirement
#[derive(Debug, Clone, PartialEq, Eq)]
struct Requirement<'a> {
    name: &'a str,
    specifiers: Vec<(&'a str, &'a str)>,
}

const OPERATORS: [&str; 10] = ["~=", "==", "!=", "<=", ">=", "<<", ">>", "<", ">", "="];

impl PyDist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a distribution name to an explicit Debian package
    pub fn with_override(mut self, dist: &str, package: impl Into<String>) -> Self {
        self.overrides.insert(normalize_dist_name(dist), package.into());
        self
    }

    fn package_name(&self, dist: &str) -> String {
        if dist == "python3" || dist.starts_with(PACKAGE_PREFIX) {
            return dist.to_string();
        }

        let normalized = normalize_dist_name(dist);
        if let Some(package) = self.overrides.get(&normalized) {
            return package.clone();
        }

        info!(
            "no package override for {}, guessing {}{}",
            dist, PACKAGE_PREFIX, normalized
        );
        format!("{}{}", PACKAGE_PREFIX, normalized)
    }
}

impl RequirementTranslator for PyDist {
    fn parse_requirements_file(&self, path: &Utf8Path) -> Vec<String> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("cannot read requirements file {}: {}", path, e);
                return Vec::new();
            },
        };

        let mut result = Vec::new();
        let mut in_section = false;

        for line in content.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            // extras and environment-specific sections are optional
            if line.starts_with('[') {
                in_section = true;
                continue;
            }
            if in_section {
                continue;
            }

            let relation = self.guess_constraint(line);
            if !relation.is_empty() {
                result.push(relation);
            }
        }

        debug!("{} requirement(s) read from {}", result.len(), path);
        result
    }

    fn guess_constraint(&self, raw: &str) -> String {
        let input = raw.trim();
        if input.contains('|') {
            return input.to_string();
        }

        let Some(requirement) = parse_requirement(input) else {
            debug!("leaving unparsable requirement as is: {}", input);
            return input.to_string();
        };

        let name = self.package_name(requirement.name);
        let constraint = requirement
            .specifiers
            .iter()
            .find_map(|(op, version)| map_specifier(op, version));

        match constraint {
            Some((op, version)) => Relation::versioned(name, op, version).to_string(),
            None => Relation::package(name).to_string(),
        }
    }
}

/// Lowercase and fold `_`/`.` into `-`
fn normalize_dist_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c == '_' || c == '.' { '-' } else { c })
        .collect()
}

fn parse_requirement(input: &str) -> Option<Requirement<'_>> {
    // environment markers do not affect the Debian relation
    let input = input.split(';').next()?.trim();

    let name_end = input
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
        .unwrap_or(input.len());
    let name = &input[..name_end];
    if name.is_empty() {
        return None;
    }

    let mut rest = input[name_end..].trim_start();
    if let Some(after) = rest.strip_prefix('[') {
        rest = after.split_once(']')?.1.trim_start();
    }
    if let Some(inner) = rest.strip_prefix('(') {
        rest = inner.strip_suffix(')')?.trim();
    }

    let mut specifiers = Vec::new();
    for spec in rest.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let op = OPERATORS.iter().find(|op| spec.starts_with(**op))?;
        let version = spec[op.len()..].trim();
        if version.is_empty() {
            return None;
        }
        specifiers.push((*op, version));
    }

    Some(Requirement { name, specifiers })
}

fn map_specifier(op: &str, version: &str) -> Option<(Comparator, String)> {
    let mapped = match op {
        ">=" | "~=" => Comparator::GreaterEq,
        ">" | ">>" => Comparator::StrictlyGreater,
        "<=" => Comparator::LessEq,
        "<" | "<<" => Comparator::StrictlyLess,
        "==" => {
            if let Some(prefix) = version.strip_suffix(".*") {
                return Some((Comparator::GreaterEq, prefix.to_string()));
            }
            Comparator::Exact
        },
        "=" => Comparator::Exact,
        _ => return None,
    };
    Some((mapped, version.to_string()))
}
