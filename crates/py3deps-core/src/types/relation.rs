//! Structured package relations.
//!
//! A Relation is built from a package name plus an optional version
//! constraint, and rendered to the Debian control-file grammar only when it
//! is stored: `name`, `name (>= 3.5)`, `name (<< 3.7)` or `a|b|c`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Version;

/// Debian relation operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparator {
    GreaterEq,       // >=
    StrictlyGreater, // >>
    LessEq,          // <=
    StrictlyLess,    // <<
    Exact,           // =
}

/// A package relation, possibly an alternation of several packages
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    /// Single package with an optional `(op version)` constraint
    Package {
        name: String,
        constraint: Option<(Comparator, String)>,
    },
    /// Any one of the listed relations satisfies the dependency
    AnyOf(Vec<Relation>),
}

/// Relation categories populated for a binary package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    Depends,
    Recommends,
    Suggests,
    Enhances,
    Breaks,
}

impl Comparator {
    /// Debian spelling of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparator::GreaterEq => ">=",
            Comparator::StrictlyGreater => ">>",
            Comparator::LessEq => "<=",
            Comparator::StrictlyLess => "<<",
            Comparator::Exact => "=",
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Relation {
    /// Unversioned relation on a package
    pub fn package(name: impl Into<String>) -> Self {
        Relation::Package {
            name: name.into(),
            constraint: None,
        }
    }

    /// Relation with an arbitrary operator and version text
    pub fn versioned(name: impl Into<String>, op: Comparator, version: impl fmt::Display) -> Self {
        Relation::Package {
            name: name.into(),
            constraint: Some((op, version.to_string())),
        }
    }

    /// `name (>= version)`
    pub fn at_least(name: impl Into<String>, version: impl fmt::Display) -> Self {
        Self::versioned(name, Comparator::GreaterEq, version)
    }

    /// `name (<< version)`
    pub fn below(name: impl Into<String>, version: impl fmt::Display) -> Self {
        Self::versioned(name, Comparator::StrictlyLess, version)
    }

    /// `pythonX.Y|pythonX.Z|...` in iteration order
    pub fn any_interpreter<I>(versions: I) -> Self
    where
        I: IntoIterator<Item = Version>,
    {
        Relation::AnyOf(
            versions
                .into_iter()
                .map(|v| Relation::package(v.interpreter_name()))
                .collect(),
        )
    }

    /// Package name of a single relation, `None` for alternations
    pub fn name(&self) -> Option<&str> {
        match self {
            Relation::Package { name, .. } => Some(name),
            Relation::AnyOf(_) => None,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Package {
                name,
                constraint: None,
            } => f.write_str(name),
            Relation::Package {
                name,
                constraint: Some((op, version)),
            } => write!(f, "{} ({} {})", name, op, version),
            Relation::AnyOf(alternatives) => {
                for (i, alt) in alternatives.iter().enumerate() {
                    if i > 0 {
                        f.write_str("|")?;
                    }
                    write!(f, "{}", alt)?;
                }
                Ok(())
            },
        }
    }
}

impl From<Relation> for String {
    fn from(relation: Relation) -> Self {
        relation.to_string()
    }
}

impl RelationKind {
    /// Every kind, in export order
    pub const ALL: [RelationKind; 5] = [
        RelationKind::Depends,
        RelationKind::Recommends,
        RelationKind::Suggests,
        RelationKind::Enhances,
        RelationKind::Breaks,
    ];

    /// Substitution variable the exporter registers values under
    pub fn substvar(&self) -> &'static str {
        match self {
            RelationKind::Depends => "python3:Depends",
            RelationKind::Recommends => "python3:Recommends",
            RelationKind::Suggests => "python3:Suggests",
            RelationKind::Enhances => "python3:Enhances",
            RelationKind::Breaks => "python3:Breaks",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.substvar())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_rendering() {
        assert_eq!(Relation::package("python3").to_string(), "python3");
        assert_eq!(
            Relation::at_least("python3", Version::new(3, 5)).to_string(),
            "python3 (>= 3.5)"
        );
        assert_eq!(
            Relation::below("python3-dbg", Version::new(3, 7)).to_string(),
            "python3-dbg (<< 3.7)"
        );
        assert_eq!(
            Relation::at_least("python3", "3.2.3-3~").to_string(),
            "python3 (>= 3.2.3-3~)"
        );
    }

    #[test]
    fn test_alternation_rendering() {
        let rel = Relation::any_interpreter([Version::new(3, 5), Version::new(3, 7)]);
        assert_eq!(rel.to_string(), "python3.5|python3.7");
        assert_eq!(rel.name(), None);

        assert_eq!(Relation::AnyOf(Vec::new()).to_string(), "");
    }

    #[test]
    fn test_comparator_spelling() {
        assert_eq!(Comparator::StrictlyGreater.to_string(), ">>");
        assert_eq!(Comparator::LessEq.to_string(), "<=");
        assert_eq!(Comparator::Exact.to_string(), "=");
    }

    #[test]
    fn test_kind_substvars() {
        let names: Vec<_> = RelationKind::ALL.iter().map(|k| k.substvar()).collect();
        assert_eq!(
            names,
            vec![
                "python3:Depends",
                "python3:Recommends",
                "python3:Suggests",
                "python3:Enhances",
                "python3:Breaks",
            ]
        );
    }
}
